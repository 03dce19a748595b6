//! Rule to forbid blank lines at the edges of a method or constructor body.
//!
//! # Detected Patterns
//!
//! ```java
//! void run() {
//!                      // blank line after the opening brace
//!     work();
//!                      // blank line before the closing brace
//! }
//! ```
//!
//! Every blank line of the leading and trailing runs is reported on its own.

use delta_lint_core::{Diagnostics, FileContext, NodeKind, NodeRef, Rule, RuleError, Severity};

/// Rule code for trailing-blank-line.
pub const CODE: &str = "DL002";

/// Rule name for trailing-blank-line.
pub const NAME: &str = "trailing-blank-line";

/// Message key for a blank line at the edge of a body.
pub const KEY: &str = "blank-line.body-edge";

/// Forbids blank lines right after `{` and right before `}` of a body.
#[derive(Debug, Clone)]
pub struct TrailingBlankLine {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for TrailingBlankLine {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailingBlankLine {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for TrailingBlankLine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids blank lines right after `{` and right before `}` of a body"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[
            NodeKind::Method,
            NodeKind::Constructor,
            NodeKind::CompactConstructor,
        ]
    }

    fn message(&self, _key: &str, _args: &[String]) -> String {
        "Empty lines are not allowed at the beginning or the end of a body".to_string()
    }

    fn check_node(
        &self,
        ctx: &FileContext<'_>,
        node: NodeRef<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), RuleError> {
        let Some(block) = node.try_first_child_of_kind(NodeKind::Block) else {
            return Ok(());
        };
        let open = block.first_child_of_kind(NodeKind::BlockOpen)?.line();
        let Some(close) = block.last_child_of_kind(NodeKind::BlockClose) else {
            return Ok(());
        };
        let close = close.line();

        for line in (open + 1)..close {
            if !ctx.is_blank(line) {
                break;
            }
            out.log(line, 1, KEY, Vec::new());
        }

        for line in ((open + 2)..close).rev() {
            if !ctx.is_blank(line) {
                break;
            }
            out.log(line, 1, KEY, Vec::new());
        }

        Ok(())
    }
}
