//! Context types for rule execution.

use crate::diff::RunContext;
use std::path::{Path, PathBuf};

/// Context provided to rules for one file.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// File contents as a string.
    pub content: &'a str,
    /// Shared state of the current run.
    pub run: &'a RunContext,
    lines: Vec<&'a str>,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path, run: &'a RunContext) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            relative_path,
            content,
            run,
            lines: content.lines().collect(),
        }
    }

    /// File name without directories (e.g., `"Foo.java"`).
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Text of a 1-indexed line, without its terminator.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&'a str> {
        line.checked_sub(1).and_then(|i| self.lines.get(i)).copied()
    }

    /// Whether a 1-indexed line exists and holds only whitespace.
    #[must_use]
    pub fn is_blank(&self, line: usize) -> bool {
        self.line(line).is_some_and(|l| l.trim().is_empty())
    }

    /// Number of lines in the file.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
