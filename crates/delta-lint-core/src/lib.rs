//! # delta-lint-core
//!
//! Core framework for change-scoped style checks over syntax trees.
//!
//! This crate provides:
//!
//! - [`tree`]: an arena [`SyntaxTree`] with lazy navigation and access-level resolution
//! - [`diff`]: the changed-line model and the memoized [`RunContext`]
//! - [`Rule`] trait for checks dispatched by [`NodeKind`]
//! - [`Analyzer`] for discovering, parsing and checking files
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use delta_lint_core::{Analyzer, RunContext};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(JavaParser::new())
//!     .run_context(RunContext::git("."))
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod parser;
mod rule;
mod types;

pub mod diff;
pub mod tree;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use diff::{ChangeSet, DiffError, FileChange, RunContext};
pub use parser::{ParseError, SourceParser};
pub use rule::{Diagnostics, Finding, Rule, RuleBox, RuleError};
pub use tree::{NodeKind, NodeRef, SyntaxTree, TreeShapeError};
pub use types::{LintResult, Location, Severity, Violation};
pub use utils::allowance::AllowCheck;
