//! Changed-line model built from version control.
//!
//! [`RunContext`] is created once per execution and answers, with
//! memoization, which files and lines changed relative to a base branch.
//! Line numbers inside [`FileChange`] are 0-based; checks compare them with
//! 1-based tree positions through [`FileChange::added_intersects`] and
//! [`FileChange::deleted_intersects`].

mod change;
mod context;
mod git;
mod parse;

pub use change::{ChangeSet, FileChange};
pub use context::{RunContext, FETCH_TIMEOUT, QUERY_TIMEOUT};
pub use git::{GitCli, VcsBackend};
pub use parse::{parse_name_only, parse_unified_diff};

use thiserror::Error;

/// Errors raised while querying version control.
///
/// Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum DiffError {
    /// The VCS process could not be started or awaited.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Command line that was attempted.
        command: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The VCS process exited with a non-zero status.
    #[error(
        "`{command}` failed with status {}: {stderr}",
        .status.map_or_else(|| "unknown".to_string(), |c| c.to_string())
    )]
    CommandFailed {
        /// Command line that failed.
        command: String,
        /// Exit code, if the process exited normally.
        status: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// The same query already failed earlier in this run.
    #[error("{query} failed earlier in this run: {message}")]
    FailedEarlier {
        /// Name of the query.
        query: &'static str,
        /// Message of the original failure.
        message: String,
    },

    /// The query cannot be answered by an offline context.
    #[error("{query} is not available without a version-control backend")]
    Unavailable {
        /// Name of the query.
        query: &'static str,
    },

    /// The async runtime for process handling could not be created.
    #[error("failed to start process runtime: {0}")]
    Runtime(std::io::Error),
}
