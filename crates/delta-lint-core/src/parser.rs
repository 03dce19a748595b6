//! Seam between source languages and the analyzer.

use crate::tree::SyntaxTree;

/// Turns source text into a [`SyntaxTree`].
pub trait SourceParser: Send + Sync {
    /// Returns the language identifier (e.g., `"java"`).
    fn language_id(&self) -> &'static str;

    /// File extensions handled by this parser, without the leading dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses one file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the source cannot be parsed cleanly.
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError>;
}

/// Errors raised while building a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// The parser produced no tree.
    #[error("parser returned no tree")]
    NoTree,

    /// The source contains syntax errors.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (1-indexed).
        column: usize,
    },
}
