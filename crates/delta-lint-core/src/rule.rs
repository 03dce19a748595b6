//! Rule trait for defining node-dispatched checks.

use crate::context::FileContext;
use crate::diff::DiffError;
use crate::tree::{NodeKind, NodeRef, TreeShapeError};
use crate::types::Severity;

/// A check invoked for every node of the kinds it registers.
///
/// The analyzer walks each file's tree in pre-order and calls
/// [`Rule::check_node`] for nodes whose kind appears in
/// [`Rule::node_kinds`]. Rules append findings to the per-file
/// [`Diagnostics`] sink and never see other files' state except through
/// [`FileContext::run`].
///
/// # Example
///
/// ```ignore
/// use delta_lint_core::{Diagnostics, FileContext, NodeKind, NodeRef, Rule, RuleError};
///
/// pub struct NoEmptyMethods;
///
/// impl Rule for NoEmptyMethods {
///     fn name(&self) -> &'static str { "no-empty-methods" }
///     fn code(&self) -> &'static str { "DL900" }
///     fn node_kinds(&self) -> &'static [NodeKind] { &[NodeKind::Method] }
///
///     fn check_node(
///         &self,
///         _ctx: &FileContext<'_>,
///         node: NodeRef<'_>,
///         out: &mut Diagnostics,
///     ) -> Result<(), RuleError> {
///         if let Some(block) = node.try_first_child_of_kind(NodeKind::Block) {
///             if block.line() == block.end_line() {
///                 out.log(node.line(), node.column(), "method.empty", vec![]);
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "annotation-gap").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Node kinds this rule is dispatched on.
    fn node_kinds(&self) -> &'static [NodeKind];

    /// Renders the message for a logged key.
    fn message(&self, key: &str, args: &[String]) -> String {
        if args.is_empty() {
            key.to_string()
        } else {
            format!("{key} ({})", args.join(", "))
        }
    }

    /// Checks one node and appends findings to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Diff`] when version-control state is needed but
    /// cannot be obtained; the run is aborted.
    fn check_node(
        &self,
        ctx: &FileContext<'_>,
        node: NodeRef<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Errors a rule can raise while checking a node.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Version-control state was unavailable.
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// An expected structural element was missing; the node is skipped.
    #[error(transparent)]
    Shape(#[from] TreeShapeError),
}

/// A finding logged by a rule, before it becomes a [`Violation`](crate::Violation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Line (1-indexed).
    pub line: usize,
    /// Column (1-indexed).
    pub column: usize,
    /// Message key.
    pub key: &'static str,
    /// Message arguments.
    pub args: Vec<String>,
}

/// Per-file, per-rule sink for findings.
#[derive(Debug, Default)]
pub struct Diagnostics {
    findings: Vec<Finding>,
}

impl Diagnostics {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs a finding at `line:column`.
    pub fn log(&mut self, line: usize, column: usize, key: &'static str, args: Vec<String>) {
        self.findings.push(Finding {
            line,
            column,
            key,
            args,
        });
    }

    /// Findings logged so far, in emission order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Takes all findings, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<Finding> {
        std::mem::take(&mut self.findings)
    }

    /// Discards everything logged so far.
    pub fn clear(&mut self) {
        self.findings.clear();
    }

    /// Number of findings logged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Whether nothing was logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}
