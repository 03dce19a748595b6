//! Rule to forbid runs of blank lines inside a method or constructor.
//!
//! # Rationale
//!
//! A single blank line separates logical steps. Two or more in a row only
//! stretch the declaration and usually mark leftovers of deleted code.
//!
//! # Detected Patterns
//!
//! A line counts as occupied when a syntax node starts on it or a block
//! comment or text block spans it. The declaration's own annotations are not
//! taken into account. Between the first and the last occupied line, every
//! unoccupied line that follows another unoccupied line is reported together
//! with its predecessor, so overlapping windows report the shared line twice:
//!
//! | Consecutive blank lines | Violations |
//! |-------------------------|------------|
//! | 1 | 0 |
//! | 2 | 2 |
//! | 3 | 4 |

use delta_lint_core::{Diagnostics, FileContext, NodeKind, NodeRef, Rule, RuleError, Severity};
use std::collections::BTreeSet;

/// Rule code for intermediate-blank-run.
pub const CODE: &str = "DL003";

/// Rule name for intermediate-blank-run.
pub const NAME: &str = "intermediate-blank-run";

/// Message key for a line of a blank run.
pub const KEY: &str = "blank-line.run";

/// Forbids runs of two or more blank lines inside a declaration.
#[derive(Debug, Clone)]
pub struct IntermediateBlankRun {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for IntermediateBlankRun {
    fn default() -> Self {
        Self::new()
    }
}

impl IntermediateBlankRun {
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

impl Rule for IntermediateBlankRun {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids runs of two or more blank lines inside a declaration"
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
        "More than one consecutive empty line is not allowed".to_string()
    }

    fn check_node(
        &self,
        _ctx: &FileContext<'_>,
        node: NodeRef<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), RuleError> {
        let occupied = occupied_lines(node);
        let (Some(&first), Some(&last)) = (occupied.first(), occupied.last()) else {
            return Ok(());
        };

        for line in blank_runs(&occupied, first, last) {
            out.log(line, 1, KEY, Vec::new());
        }
        Ok(())
    }
}

/// Lines on which something of the declaration is written.
fn occupied_lines(decl: NodeRef<'_>) -> BTreeSet<usize> {
    let modifiers = decl.try_first_child_of_kind(NodeKind::Modifiers);

    decl.descendants()
        .filter(|n| Some(*n) != modifiers && !in_own_annotation(*n, modifiers))
        .flat_map(|n| match n.kind() {
            NodeKind::BlockCommentBegin | NodeKind::TextBlockBegin => n.line()..=n.end_line(),
            _ => n.line()..=n.line(),
        })
        .collect()
}

fn in_own_annotation(node: NodeRef<'_>, modifiers: Option<NodeRef<'_>>) -> bool {
    let Some(modifiers) = modifiers else {
        return false;
    };
    std::iter::once(node)
        .chain(node.ancestors())
        .take_while(|n| *n != modifiers)
        .any(|n| n.kind() == NodeKind::Annotation && n.parent() == Some(modifiers))
}

/// Reported lines: both members of every adjacent pair of unoccupied lines.
fn blank_runs(occupied: &BTreeSet<usize>, first: usize, last: usize) -> Vec<usize> {
    let mut reported = Vec::new();
    let mut previous_blank = false;
    for line in first..last {
        if occupied.contains(&line) {
            previous_blank = false;
            continue;
        }
        if previous_blank {
            reported.push(line - 1);
            reported.push(line);
        }
        previous_blank = true;
    }
    reported
}
