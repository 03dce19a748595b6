//! Helpers for running one rule over a Java snippet.

use delta_lint_core::{Analyzer, ChangeSet, FileChange, Rule, RunContext, Violation};
use delta_lint_java::JavaParser;
use std::path::Path;

/// File name every snippet is checked as.
pub(crate) const FILE: &str = "Sample.java";

/// Runs `rule` over `source` with the given run context.
pub(crate) fn check_with(rule: impl Rule + 'static, source: &str, run: RunContext) -> Vec<Violation> {
    let analyzer = Analyzer::builder()
        .root("/repo")
        .parser(JavaParser::new())
        .run_context(run)
        .rule(rule)
        .build()
        .unwrap();
    analyzer
        .check_source(&Path::new("/repo").join(FILE), source)
        .unwrap()
}

/// Runs `rule` over `source` with an empty change set.
pub(crate) fn check(rule: impl Rule + 'static, source: &str) -> Vec<Violation> {
    check_with(rule, source, RunContext::with_changes(ChangeSet::new()))
}

/// Offline run context in which the given 0-based lines of [`FILE`] were added.
pub(crate) fn added(lines: impl IntoIterator<Item = usize>) -> RunContext {
    RunContext::with_changes(ChangeSet::new().with(FileChange::new(FILE).with_added(lines)))
}

/// Offline run context in which every line of `source` was added.
pub(crate) fn all_added(source: &str) -> RunContext {
    added(0..source.lines().count())
}

/// Reported line numbers, in order.
pub(crate) fn lines(violations: &[Violation]) -> Vec<usize> {
    violations.iter().map(|v| v.location.line).collect()
}
