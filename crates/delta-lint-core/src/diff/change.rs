//! Changed line sets per file.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Added and deleted lines of one file.
///
/// Line numbers are 0-based, as emitted by the diff source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileChange {
    /// Repository-relative path.
    pub path: PathBuf,
    /// Added line numbers (0-based).
    pub added: BTreeSet<usize>,
    /// Deleted line numbers (0-based).
    pub deleted: BTreeSet<usize>,
}

impl FileChange {
    /// Creates an empty change for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            added: BTreeSet::new(),
            deleted: BTreeSet::new(),
        }
    }

    /// Adds 0-based added line numbers.
    #[must_use]
    pub fn with_added(mut self, lines: impl IntoIterator<Item = usize>) -> Self {
        self.added.extend(lines);
        self
    }

    /// Adds 0-based deleted line numbers.
    #[must_use]
    pub fn with_deleted(mut self, lines: impl IntoIterator<Item = usize>) -> Self {
        self.deleted.extend(lines);
        self
    }

    /// Merges another change for the same file into this one.
    pub fn merge(&mut self, other: &Self) {
        self.added.extend(other.added.iter().copied());
        self.deleted.extend(other.deleted.iter().copied());
    }

    /// Whether any added line falls in the 1-based inclusive range `first..=last`.
    #[must_use]
    pub fn added_intersects(&self, first: usize, last: usize) -> bool {
        intersects(&self.added, first, last)
    }

    /// Whether any deleted line falls in the 1-based inclusive range `first..=last`.
    #[must_use]
    pub fn deleted_intersects(&self, first: usize, last: usize) -> bool {
        intersects(&self.deleted, first, last)
    }

    /// Whether the file has no changed lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

fn intersects(lines: &BTreeSet<usize>, first: usize, last: usize) -> bool {
    if first == 0 || last < first {
        return false;
    }
    lines.range(first - 1..last).next().is_some()
}

/// Changes of every file touched by a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    files: BTreeMap<PathBuf, FileChange>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file change, unioning line numbers with any existing entry.
    pub fn insert(&mut self, change: FileChange) {
        match self.files.get_mut(&change.path) {
            Some(existing) => existing.merge(&change),
            None => {
                self.files.insert(change.path.clone(), change);
            }
        }
    }

    /// Adds a file change (builder form).
    #[must_use]
    pub fn with(mut self, change: FileChange) -> Self {
        self.insert(change);
        self
    }

    /// Unions another change set into this one.
    pub fn extend(&mut self, other: Self) {
        for change in other.files.into_values() {
            self.insert(change);
        }
    }

    /// Looks up the change for `path`.
    ///
    /// An exact key match wins. Otherwise the first entry where one path is a
    /// component-wise suffix of the other is returned, so paths relative to a
    /// subdirectory of the repository still resolve.
    #[must_use]
    pub fn changes_for(&self, path: &Path) -> Option<&FileChange> {
        if let Some(change) = self.files.get(path) {
            return Some(change);
        }
        self.files
            .iter()
            .find(|(key, _)| key.ends_with(path) || path.ends_with(key))
            .map(|(_, change)| change)
    }

    /// Iterates file changes in path order.
    pub fn iter(&self) -> impl Iterator<Item = &FileChange> {
        self.files.values()
    }

    /// Paths of all changed files, in order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Number of changed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<FileChange> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = FileChange>>(iter: I) -> Self {
        let mut set = Self::new();
        for change in iter {
            set.insert(change);
        }
        set
    }
}
