//! Rule to require Javadoc on methods with long bodies.
//!
//! # Rationale
//!
//! Long methods are the hardest to understand from their name alone. Unlike
//! `scoped-javadoc` this rule is not limited to changed lines, so it is only
//! part of the `strict` preset.
//!
//! # Configuration
//!
//! - `max`: Maximum body span in lines, braces included (default: 150)
//! - `fileNameRegex`: Only files whose name fully matches are checked (default: `.*`)

use crate::factory::{int_option, str_option, RuleConfigError};
use delta_lint_core::utils::javadoc_before;
use delta_lint_core::{
    Diagnostics, FileContext, NodeKind, NodeRef, Rule, RuleConfig, RuleError, Severity,
};
use regex::Regex;

/// Rule code for long-method-javadoc.
pub const CODE: &str = "DL005";

/// Rule name for long-method-javadoc.
pub const NAME: &str = "long-method-javadoc";

/// Message key for a long undocumented method.
pub const KEY: &str = "javadoc.long-method";

/// Options of [`LongMethodJavadoc`].
#[derive(Debug, Clone)]
pub struct LongMethodJavadocConfig {
    /// Maximum body span in lines.
    pub max: usize,
    /// Pattern a file name must fully match to be checked; `None` checks every file.
    pub file_name_regex: Option<Regex>,
}

impl Default for LongMethodJavadocConfig {
    fn default() -> Self {
        Self {
            max: 150,
            file_name_regex: None,
        }
    }
}

impl LongMethodJavadocConfig {
    /// Reads options from a rule configuration table.
    ///
    /// # Errors
    ///
    /// Returns [`RuleConfigError`] if `max` is not a non-negative integer or
    /// `fileNameRegex` does not compile.
    pub fn from_rule_config(options: &RuleConfig) -> Result<Self, RuleConfigError> {
        let mut config = Self::default();

        if let Some(max) = int_option(options, NAME, "max")? {
            config.max = usize::try_from(max).map_err(|_| RuleConfigError::InvalidOption {
                rule: NAME,
                option: "max",
                expected: "a non-negative integer",
            })?;
        }
        if let Some(pattern) = str_option(options, NAME, "fileNameRegex")? {
            let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
                RuleConfigError::InvalidRegex {
                    rule: NAME,
                    option: "fileNameRegex",
                    source,
                }
            })?;
            config.file_name_regex = Some(regex);
        }

        Ok(config)
    }
}

/// Requires Javadoc on methods whose body exceeds a line limit.
#[derive(Debug, Clone, Default)]
pub struct LongMethodJavadoc {
    config: LongMethodJavadocConfig,
    severity: Option<Severity>,
}

impl LongMethodJavadoc {
    /// Creates the rule with the given options.
    #[must_use]
    pub fn new(config: LongMethodJavadocConfig) -> Self {
        Self {
            config,
            severity: None,
        }
    }

    /// Sets the maximum body span.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.config.max = max;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

impl Rule for LongMethodJavadoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires Javadoc on methods with long bodies"
    }

    fn default_severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::Warning)
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Method]
    }

    fn message(&self, _key: &str, args: &[String]) -> String {
        match args {
            [span, max] => format!(
                "Method body spans {span} lines (max {max}) and needs a Javadoc comment describing it"
            ),
            _ => "Long method needs a Javadoc comment".to_string(),
        }
    }

    fn check_node(
        &self,
        ctx: &FileContext<'_>,
        node: NodeRef<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), RuleError> {
        if let Some(regex) = &self.config.file_name_regex {
            if !ctx.file_name().is_some_and(|name| regex.is_match(name)) {
                return Ok(());
            }
        }
        let Some(block) = node.try_first_child_of_kind(NodeKind::Block) else {
            return Ok(());
        };
        let open = block.first_child_of_kind(NodeKind::BlockOpen)?.line();
        let Some(close) = block.last_child_of_kind(NodeKind::BlockClose) else {
            return Ok(());
        };

        let span = close.line() - open + 1;
        if span > self.config.max && javadoc_before(ctx, node).is_none() {
            out.log(
                node.line(),
                node.column(),
                KEY,
                vec![span.to_string(), self.config.max.to_string()],
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check, lines};

    fn source(body_lines: usize, documented: bool) -> String {
        let doc = if documented { "    /** Does work. */\n" } else { "" };
        let body = "        work();\n".repeat(body_lines);
        format!("class Sample {{\n{doc}    void run() {{\n{body}    }}\n\n    Sample() {{\n{body}    }}\n}}\n")
    }

    #[test]
    fn test_span_over_max_is_reported() {
        let violations = check(LongMethodJavadoc::default().max(5), &source(4, false));
        assert_eq!(lines(&violations), vec![2]);
        assert_eq!(violations[0].args, vec!["6", "5"]);
        assert_eq!(
            violations[0].message,
            "Method body spans 6 lines (max 5) and needs a Javadoc comment describing it"
        );
    }

    #[test]
    fn test_span_at_max_passes() {
        assert!(check(LongMethodJavadoc::default().max(6), &source(4, false)).is_empty());
    }

    #[test]
    fn test_javadoc_satisfies() {
        assert!(check(LongMethodJavadoc::default().max(2), &source(4, true)).is_empty());
    }

    #[test]
    fn test_file_name_filter() {
        let options = RuleConfig::default()
            .with_option("max", 2)
            .with_option("fileNameRegex", ".*Service\\.java");
        let rule = LongMethodJavadoc::new(LongMethodJavadocConfig::from_rule_config(&options).unwrap());
        assert!(check(rule, &source(4, false)).is_empty());

        let options = RuleConfig::default().with_option("fileNameRegex", "Sample\\.java");
        let rule = LongMethodJavadoc::new(LongMethodJavadocConfig::from_rule_config(&options).unwrap())
            .max(2);
        assert_eq!(check(rule, &source(4, false)).len(), 1);
    }

    #[test]
    fn test_negative_max_is_rejected() {
        let options = RuleConfig::default().with_option("max", -3);
        assert!(matches!(
            LongMethodJavadocConfig::from_rule_config(&options),
            Err(RuleConfigError::InvalidOption { option: "max", .. })
        ));
    }
}
