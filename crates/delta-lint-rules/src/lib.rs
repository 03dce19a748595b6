//! # delta-lint-rules
//!
//! Built-in rules for delta-lint.
//!
//! The spacing rules look at one method or constructor at a time. The
//! documentation rules additionally consult the run's change set so that
//! only declarations touched on the current branch are held to the
//! documentation standard.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `annotation-gap` | Forbids blank lines and comments between annotations and the signature |
//! | DL002 | `trailing-blank-line` | Forbids blank lines right after `{` and right before `}` of a body |
//! | DL003 | `intermediate-blank-run` | Forbids runs of two or more blank lines inside a declaration |
//! | DL004 | `scoped-javadoc` | Requires Javadoc on declarations whose body changed |
//! | DL005 | `long-method-javadoc` | Requires Javadoc on methods with long bodies |
//!
//! ## Usage
//!
//! ```ignore
//! use delta_lint_core::{Analyzer, RunContext};
//! use delta_lint_java::JavaParser;
//! use delta_lint_rules::{AnnotationGap, ScopedJavadoc, ScopedJavadocConfig};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(JavaParser::new())
//!     .run_context(RunContext::git("."))
//!     .rule(AnnotationGap::new())
//!     .rule(ScopedJavadoc::new(ScopedJavadocConfig::builder().min_line_count(2).build()?))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotation_gap;
mod factory;
mod intermediate_blank_run;
mod long_method_javadoc;
mod presets;
mod scoped_javadoc;
mod trailing_blank_line;

#[cfg(test)]
mod testing;

pub use annotation_gap::AnnotationGap;
pub use factory::{rules_from_config, RuleConfigError};
pub use intermediate_blank_run::IntermediateBlankRun;
pub use long_method_javadoc::{LongMethodJavadoc, LongMethodJavadocConfig};
pub use presets::{all_rules, minimal_rules, recommended_rules, strict_rules, Preset};
pub use scoped_javadoc::{ScopedJavadoc, ScopedJavadocConfig, ScopedJavadocConfigBuilder};
pub use trailing_blank_line::TrailingBlankLine;

/// Re-export core types for convenience.
pub use delta_lint_core::{Rule, RuleBox, Severity, Violation};
