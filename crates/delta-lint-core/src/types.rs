//! Core types for lint violations and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity `{other}`")),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "DL001").
    pub code: String,
    /// Rule name (e.g., "annotation-gap").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Message key the rule logged (e.g., "javadoc.missing").
    pub key: String,
    /// Arguments substituted into the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Rendered human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            key: String::new(),
            args: Vec::new(),
            message: message.into(),
        }
    }

    /// Records the message key and arguments the message was rendered from.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>, args: Vec<String>) -> Self {
        self.key = key.into();
        self.args = args;
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Number of files skipped because they failed to parse.
    #[serde(default)]
    pub files_skipped: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Counts violations by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.violations
            .iter()
            .fold((0, 0, 0), |(e, w, i), v| match v.severity {
                Severity::Error => (e + 1, w, i),
                Severity::Warning => (e, w + 1, i),
                Severity::Info => (e, w, i + 1),
            })
    }

    /// One-line summary of counts.
    #[must_use]
    pub fn summary(&self) -> String {
        let (errors, warnings, infos) = self.count_by_severity();
        format!(
            "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_checked
        )
    }

    /// Sorts violations by file, line and column, keeping emission order for ties.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity, line: usize) -> Violation {
        Violation::new(
            "DL004",
            "scoped-javadoc",
            severity,
            Location::new(PathBuf::from("src/Foo.java"), line, 5),
            "missing javadoc",
        )
    }

    #[test]
    fn display_is_single_line() {
        let v = make_violation(Severity::Warning, 42);
        assert_eq!(
            v.to_string(),
            "src/Foo.java:42:5: warning [DL004] missing javadoc"
        );
    }

    #[test]
    fn with_key_records_arguments() {
        let v = make_violation(Severity::Error, 1)
            .with_key("javadoc.long-method", vec!["200".into(), "150".into()]);
        assert_eq!(v.key, "javadoc.long-method");
        assert_eq!(v.args, vec!["200", "150"]);
    }

    #[test]
    fn has_violations_at_threshold() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning, 1));
        assert!(!result.has_violations_at(Severity::Error));
        assert!(result.has_violations_at(Severity::Warning));
        assert!(result.has_violations_at(Severity::Info));
    }

    #[test]
    fn counts_by_severity() {
        let mut result = LintResult::new();
        result.files_checked = 3;
        result.violations.push(make_violation(Severity::Error, 1));
        result.violations.push(make_violation(Severity::Warning, 2));
        result.violations.push(make_violation(Severity::Warning, 3));
        assert_eq!(result.count_by_severity(), (1, 2, 0));
        assert_eq!(
            result.summary(),
            "Found 1 error(s), 2 warning(s), 0 info(s) in 3 file(s)"
        );
    }

    #[test]
    fn sort_is_stable_for_equal_positions() {
        let mut result = LintResult::new();
        let mut first = make_violation(Severity::Error, 7);
        first.rule = "first".into();
        let mut second = make_violation(Severity::Error, 7);
        second.rule = "second".into();
        result.violations.push(make_violation(Severity::Error, 9));
        result.violations.push(first);
        result.violations.push(second);

        result.sort();
        let rules: Vec<&str> = result.violations.iter().map(|v| v.rule.as_str()).collect();
        assert_eq!(rules, vec!["first", "second", "scoped-javadoc"]);
    }

    #[test]
    fn severity_parses_config_names() {
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("Error".parse::<Severity>(), Ok(Severity::Error));
        assert!("fatal".parse::<Severity>().is_err());
    }
}
