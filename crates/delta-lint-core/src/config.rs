//! Configuration types for delta-lint.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for delta-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for a failing exit status (default: "error").
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Whether a rule is explicitly enabled in the configuration.
    #[must_use]
    pub fn is_rule_explicitly_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .is_some_and(|c| c.enabled == Some(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration of one rule.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Severity threshold for a failing run.
    ///
    /// # Errors
    ///
    /// Returns an error if `fail_on` is not a known severity.
    pub fn fail_on_severity(&self) -> Result<Severity, ConfigError> {
        match &self.fail_on {
            None => Ok(Severity::Error),
            Some(s) => s.parse().map_err(|message| ConfigError::Parse { message }),
        }
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions to analyze, without the leading dot (default: the parser's).
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Maximum number of parallel file analyses.
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Abort instead of skipping files that fail to parse.
    #[serde(default)]
    pub fail_on_parse_error: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/build/**".to_string(), "**/target/**".to_string()],
            extensions: Vec::new(),
            parallelism: None,
            fail_on_parse_error: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Sets a rule-specific option (builder form).
    #[must_use]
    pub fn with_option(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    /// Whether an option is present.
    #[must_use]
    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Gets a string array option.
    ///
    /// A single string is accepted as a comma-separated list.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        match self.options.get(key) {
            Some(toml::Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            Some(toml::Value::String(s)) => s
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.is_empty());
        assert!(config.analyzer.exclude.contains(&"**/build/**".to_string()));
        assert_eq!(config.fail_on_severity().unwrap(), Severity::Error);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "warning"

[analyzer]
root = "./src"
exclude = ["**/generated/**"]
parallelism = 4

[rules.scoped-javadoc]
enabled = true
severity = "warning"
minLineCount = 2
ignoreClassNameRegex = ".*Test"
allowedAnnotations = ["Override"]
accessModifiers = "public, protected"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_on_severity().unwrap(), Severity::Warning);
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.parallelism, Some(4));
        assert!(config.is_rule_enabled("scoped-javadoc"));
        assert!(config.is_rule_explicitly_enabled("scoped-javadoc"));
        assert!(config.is_rule_enabled("annotation-gap"));
        assert_eq!(config.rule_severity("scoped-javadoc"), Some(Severity::Warning));

        let rule = config.rule("scoped-javadoc").unwrap();
        assert_eq!(rule.options["minLineCount"].as_integer(), Some(2));
        assert_eq!(rule.options["ignoreClassNameRegex"].as_str(), Some(".*Test"));
        assert_eq!(rule.get_str_array("allowedAnnotations"), vec!["Override"]);
        assert_eq!(
            rule.get_str_array("accessModifiers"),
            vec!["public", "protected"]
        );
        assert!(!rule.has_option("enabledGit"));
    }

    #[test]
    fn test_disabled_rule() {
        let config = Config::parse("[rules.trailing-blank-line]\nenabled = false\n").unwrap();
        assert!(!config.is_rule_enabled("trailing-blank-line"));
    }

    #[test]
    fn test_invalid_fail_on() {
        let config = Config::parse("fail_on = \"fatal\"").unwrap();
        assert!(config.fail_on_severity().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("preset = "),
            Err(ConfigError::Parse { .. })
        ));
    }
}
