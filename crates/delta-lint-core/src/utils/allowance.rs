//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // delta-lint: allow(scoped-javadoc) reason="generated accessor"
//! ```
//!
//! A directive applies to violations on its own line and on the line below.

use std::collections::{BTreeMap, HashSet};

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowDirective {
    /// Rule names that are allowed (`all` matches every rule).
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

/// All directives of one file, indexed by 1-based line.
#[derive(Debug, Clone, Default)]
pub struct AllowDirectives {
    by_line: BTreeMap<usize, AllowDirective>,
}

impl AllowDirectives {
    /// Scans `content` for directives.
    #[must_use]
    pub fn scan(content: &str) -> Self {
        let by_line = content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| parse_allow_directive(line).map(|d| (i + 1, d)))
            .collect();
        Self { by_line }
    }

    /// Whether the file holds no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Checks whether `rule_name` is allowed at a 1-based `line`.
    #[must_use]
    pub fn check(&self, line: usize, rule_name: &str) -> AllowCheck {
        for candidate in [line.saturating_sub(1), line] {
            let Some(directive) = self.by_line.get(&candidate) else {
                continue;
            };
            if directive.rules.contains(rule_name) || directive.rules.contains("all") {
                return AllowCheck::Allowed {
                    reason: directive.reason.clone(),
                };
            }
        }
        AllowCheck::Denied
    }
}

/// Parses an allowance directive from a line holding a `//` comment.
///
/// The comment may trail code on the same line.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let comment = &line[line.find("//")?..];
    let comment = comment.trim_start_matches('/').trim();

    let directive = comment.strip_prefix("delta-lint:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?;

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive("// delta-lint: allow(annotation-gap)").unwrap();
        assert!(directive.rules.contains("annotation-gap"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_allow_directive_with_reason() {
        let directive =
            parse_allow_directive("    // delta-lint: allow(scoped-javadoc) reason=\"generated\"")
                .unwrap();
        assert!(directive.rules.contains("scoped-javadoc"));
        assert_eq!(directive.reason.as_deref(), Some("generated"));
    }

    #[test]
    fn test_parse_multiple_rules_and_trailing_comment() {
        let directive =
            parse_allow_directive("int x; // delta-lint: allow(rule1, rule2 ,rule3)").unwrap();
        assert_eq!(directive.rules.len(), 3);
        assert!(directive.rules.contains("rule2"));
    }

    #[test]
    fn test_rejects_non_directives() {
        assert!(parse_allow_directive("// checkstyle: allow(x)").is_none());
        assert!(parse_allow_directive("// delta-lint: allow()").is_none());
        assert!(parse_allow_directive("/* delta-lint: allow(x) */").is_none());
        assert!(parse_allow_directive("int x;").is_none());
    }

    #[test]
    fn test_directive_covers_own_and_next_line() {
        let content = r#"class A {
    // delta-lint: allow(scoped-javadoc) reason="legacy"
    public void run() {
    }
}"#;
        let directives = AllowDirectives::scan(content);
        assert!(!directives.is_empty());

        let result = directives.check(3, "scoped-javadoc");
        assert!(result.is_allowed());
        assert_eq!(result.reason(), Some("legacy"));
        assert!(directives.check(2, "scoped-javadoc").is_allowed());
        assert!(!directives.check(4, "scoped-javadoc").is_allowed());
        assert!(!directives.check(3, "annotation-gap").is_allowed());
    }

    #[test]
    fn test_all_matches_every_rule() {
        let content = "// delta-lint: allow(all)\nvoid f() {}";
        let result = AllowDirectives::scan(content).check(2, "trailing-blank-line");
        assert!(result.is_allowed());
        assert_eq!(result.reason(), None);
    }

    #[test]
    fn test_check_allow_denied() {
        let result = AllowDirectives::scan("void f() {}").check(1, "annotation-gap");
        assert_eq!(result, AllowCheck::Denied);
    }
}
