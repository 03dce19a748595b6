//! # delta-lint-java
//!
//! Java support for delta-lint.
//!
//! [`JavaParser`] drives `tree-sitter-java` and mirrors the concrete syntax
//! tree into a [`delta_lint_core::SyntaxTree`], classifying nodes into
//! [`delta_lint_core::NodeKind`]s that the checks dispatch on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod parser;

pub use parser::JavaParser;
