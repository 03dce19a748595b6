//! Builds the active rule set from a [`Config`].

use crate::presets::Preset;
use crate::{
    AnnotationGap, IntermediateBlankRun, LongMethodJavadoc, LongMethodJavadocConfig,
    ScopedJavadoc, ScopedJavadocConfig, TrailingBlankLine,
};
use delta_lint_core::tree::ParseAccessLevelError;
use delta_lint_core::{Config, RuleBox, RuleConfig};
use tracing::debug;

/// Errors raised while turning configuration into rules.
#[derive(Debug, thiserror::Error)]
pub enum RuleConfigError {
    /// A pattern option is not a valid regular expression.
    #[error("rule `{rule}`: option `{option}` is not a valid pattern: {source}")]
    InvalidRegex {
        /// Rule name.
        rule: &'static str,
        /// Option name.
        option: &'static str,
        /// Underlying regex error.
        source: regex::Error,
    },

    /// An access level name is not recognized.
    #[error("rule `{rule}`: {source}")]
    InvalidAccessLevel {
        /// Rule name.
        rule: &'static str,
        /// Underlying parse error.
        source: ParseAccessLevelError,
    },

    /// A file extension is empty.
    #[error("rule `{rule}`: `fileExtensions` must not contain empty entries")]
    EmptyExtension {
        /// Rule name.
        rule: &'static str,
    },

    /// Git is disabled but no file names were configured.
    #[error("rule `{rule}`: `changedFileSet` is required when `enabledGit` is false")]
    MissingChangedFileSet {
        /// Rule name.
        rule: &'static str,
    },

    /// An option has the wrong type or is out of range.
    #[error("rule `{rule}`: option `{option}` must be {expected}")]
    InvalidOption {
        /// Rule name.
        rule: &'static str,
        /// Option name.
        option: &'static str,
        /// Description of the accepted values.
        expected: &'static str,
    },

    /// No rule with this name exists.
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    /// The configured preset does not exist.
    #[error("unknown preset `{0}` (expected recommended, strict or minimal)")]
    UnknownPreset(String),
}

/// Builds the rules selected by `config`.
///
/// Starts from the configured preset (recommended when unset) and adds any
/// rule outside the preset that the configuration explicitly enables. Rules
/// with options are rebuilt from their `[rules.<name>]` table. Disabled
/// rules are kept here and filtered by the analyzer.
///
/// # Errors
///
/// Returns [`RuleConfigError`] if the preset is unknown or a rule's options
/// are invalid.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, RuleConfigError> {
    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => name.parse()?,
    };

    let mut names: Vec<&'static str> = preset.rule_names().to_vec();
    for &name in Preset::all_rule_names() {
        if !names.contains(&name) && config.is_rule_explicitly_enabled(name) {
            debug!("Enabling {name} outside the {preset:?} preset");
            names.push(name);
        }
    }

    let empty = RuleConfig::default();
    names
        .into_iter()
        .map(|name| build_rule(name, config.rule(name).unwrap_or(&empty)))
        .collect()
}

fn build_rule(name: &'static str, options: &RuleConfig) -> Result<RuleBox, RuleConfigError> {
    let rule: RuleBox = match name {
        crate::annotation_gap::NAME => Box::new(AnnotationGap::new()),
        crate::trailing_blank_line::NAME => Box::new(TrailingBlankLine::new()),
        crate::intermediate_blank_run::NAME => Box::new(IntermediateBlankRun::new()),
        crate::long_method_javadoc::NAME => Box::new(LongMethodJavadoc::new(
            LongMethodJavadocConfig::from_rule_config(options)?,
        )),
        crate::scoped_javadoc::NAME => Box::new(ScopedJavadoc::new(
            ScopedJavadocConfig::from_rule_config(options)?,
        )),
        other => return Err(RuleConfigError::UnknownRule(other.to_string())),
    };
    Ok(rule)
}

/// Reads an integer option, rejecting values of another type.
pub(crate) fn int_option(
    options: &RuleConfig,
    rule: &'static str,
    option: &'static str,
) -> Result<Option<i64>, RuleConfigError> {
    match options.options.get(option) {
        None => Ok(None),
        Some(value) => value
            .as_integer()
            .map(Some)
            .ok_or(RuleConfigError::InvalidOption {
                rule,
                option,
                expected: "an integer",
            }),
    }
}

/// Reads a string option, rejecting values of another type.
pub(crate) fn str_option(
    options: &RuleConfig,
    rule: &'static str,
    option: &'static str,
) -> Result<Option<String>, RuleConfigError> {
    match options.options.get(option) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or(RuleConfigError::InvalidOption {
                rule,
                option,
                expected: "a string",
            }),
    }
}

/// Reads a boolean option, rejecting values of another type.
pub(crate) fn bool_option(
    options: &RuleConfig,
    rule: &'static str,
    option: &'static str,
) -> Result<Option<bool>, RuleConfigError> {
    match options.options.get(option) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or(RuleConfigError::InvalidOption {
                rule,
                option,
                expected: "a boolean",
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_default_is_recommended() {
        let rules = rules_from_config(&Config::default()).unwrap();
        assert_eq!(
            names(&rules),
            vec![
                "annotation-gap",
                "trailing-blank-line",
                "intermediate-blank-run",
                "scoped-javadoc",
            ]
        );
    }

    #[test]
    fn test_explicitly_enabled_rule_is_added() {
        let config = Config::parse(
            "preset = \"minimal\"\n[rules.long-method-javadoc]\nenabled = true\nmax = 40\n",
        )
        .unwrap();
        let rules = rules_from_config(&config).unwrap();
        assert!(names(&rules).contains(&"long-method-javadoc"));
        assert!(!names(&rules).contains(&"annotation-gap"));
    }

    #[test]
    fn test_unknown_preset() {
        let config = Config::parse("preset = \"paranoid\"\n").unwrap();
        assert!(matches!(
            rules_from_config(&config),
            Err(RuleConfigError::UnknownPreset(p)) if p == "paranoid"
        ));
    }

    #[test]
    fn test_invalid_options_are_fatal() {
        let config = Config::parse(
            "[rules.scoped-javadoc]\nignoreClassNameRegex = \"(unclosed\"\n",
        )
        .unwrap();
        assert!(matches!(
            rules_from_config(&config),
            Err(RuleConfigError::InvalidRegex { rule: "scoped-javadoc", .. })
        ));

        let config = Config::parse("[rules.scoped-javadoc]\nminLineCount = \"two\"\n").unwrap();
        let err = rules_from_config(&config).err().unwrap();
        assert_eq!(
            err.to_string(),
            "rule `scoped-javadoc`: option `minLineCount` must be an integer"
        );
    }

    #[test]
    fn test_string_options_reject_other_types() {
        let config = Config::parse("[rules.scoped-javadoc]\nmainBranch = 3\n").unwrap();
        let err = rules_from_config(&config).err().unwrap();
        assert_eq!(
            err.to_string(),
            "rule `scoped-javadoc`: option `mainBranch` must be a string"
        );

        let config = Config::parse(
            "[rules.scoped-javadoc]\nignoreClassNameRegex = [\"Test\"]\n",
        )
        .unwrap();
        assert!(matches!(
            rules_from_config(&config),
            Err(RuleConfigError::InvalidOption {
                option: "ignoreClassNameRegex",
                ..
            })
        ));

        let config = Config::parse(
            "preset = \"strict\"\n[rules.long-method-javadoc]\nfileNameRegex = false\n",
        )
        .unwrap();
        assert!(matches!(
            rules_from_config(&config),
            Err(RuleConfigError::InvalidOption {
                rule: "long-method-javadoc",
                option: "fileNameRegex",
                ..
            })
        ));
    }
}
