//! Rule to keep annotations glued to each other and to their declaration.
//!
//! # Rationale
//!
//! Annotations belong to the declaration they precede. A blank line or a
//! comment between them makes the annotation read as if it were detached,
//! and comments placed there are easily lost when annotations are reordered.
//!
//! # Detected Patterns
//!
//! ```java
//! @Override
//!
//! public String toString() { ... }   // blank line before the signature
//!
//! @Transactional
//! // retried by the caller
//! @Retry                              // comment between annotations
//! void save() { ... }
//! ```
//!
//! Each adjacent pair of annotations, and the last annotation together with
//! the signature, is checked separately. At most one violation is reported
//! per pair, at the first offending line.

use delta_lint_core::{
    Diagnostics, FileContext, NodeKind, NodeRef, Rule, RuleError, Severity,
};

/// Rule code for annotation-gap.
pub const CODE: &str = "DL001";

/// Rule name for annotation-gap.
pub const NAME: &str = "annotation-gap";

/// Message key for a gap between annotations or before the signature.
pub const KEY: &str = "annotation.gap";

/// Forbids blank lines and comments between annotations and the signature.
#[derive(Debug, Clone)]
pub struct AnnotationGap {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for AnnotationGap {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationGap {
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

impl Rule for AnnotationGap {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids blank lines and comments between annotations and the signature"
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
        "Blank lines and comments are not allowed between annotations and the declaration they annotate"
            .to_string()
    }

    fn check_node(
        &self,
        _ctx: &FileContext<'_>,
        node: NodeRef<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), RuleError> {
        let Some(modifiers) = node.try_first_child_of_kind(NodeKind::Modifiers) else {
            return Ok(());
        };
        let annotations: Vec<NodeRef<'_>> = modifiers
            .children()
            .filter(|c| c.kind() == NodeKind::Annotation)
            .collect();
        let Some(&last) = annotations.last() else {
            return Ok(());
        };

        for pair in annotations.windows(2) {
            let path = pair[0].siblings_from().skip(1);
            report(out, first_offender(pair[0], path, pair[1]));
        }

        // The walk leaves the modifier list and continues up to the signature.
        let Some(signature) = modifiers
            .siblings_from()
            .skip(1)
            .find(|n| !n.kind().is_comment())
        else {
            return Ok(());
        };
        let path = last
            .siblings_from()
            .skip(1)
            .chain(modifiers.siblings_from().skip(1));
        report(out, first_offender(last, path, signature));

        Ok(())
    }
}

fn report(out: &mut Diagnostics, offender: Option<NodeRef<'_>>) {
    if let Some(node) = offender {
        out.log(node.line(), 1, KEY, Vec::new());
    }
}

/// First element on the way from `start` to `end` that is a comment or that
/// does not start on the line right after the previous element ends.
fn first_offender<'t>(
    start: NodeRef<'t>,
    path: impl Iterator<Item = NodeRef<'t>>,
    end: NodeRef<'t>,
) -> Option<NodeRef<'t>> {
    let mut prev = start;
    for current in path {
        if current.kind().is_comment() || current.line() > prev.end_line() + 1 {
            return Some(current);
        }
        if current == end {
            break;
        }
        prev = current;
    }
    None
}
