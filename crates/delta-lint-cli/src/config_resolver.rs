//! Finds and loads the `delta-lint.toml` that governs a checked path.
//!
//! Lookup stops at the first hit:
//!
//! 1. the file named by `--config` (or `$DELTA_LINT_CONFIG`);
//! 2. `delta-lint.toml`, then `.delta-lint.toml`, in the checked directory
//!    and each parent up to and including the repository root (the first
//!    directory holding `.git`);
//! 3. `config.toml` in the user directory, `$DELTA_LINT_CONFIG_DIR` or
//!    `~/.delta-lint`;
//! 4. built-in defaults.

use anyhow::{Context, Result};
use delta_lint_core::Config;
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["delta-lint.toml", ".delta-lint.toml"];
const USER_FILE: &str = "config.toml";

/// Which lookup step produced the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Named on the command line.
    Flag,
    /// Found next to the sources.
    Project,
    /// Taken from the user directory.
    User,
    /// Nothing found.
    Builtin,
}

/// A loaded configuration and where it came from.
#[derive(Debug)]
pub struct Resolved {
    /// Lookup step that matched.
    pub origin: Origin,
    /// File that was read, if any.
    pub path: Option<PathBuf>,
    /// Parsed configuration.
    pub config: Config,
}

/// Locates and parses the configuration for `start`.
///
/// # Errors
///
/// Fails if the located file cannot be read or is not valid TOML. A missing
/// `--config` file is an error, never a fall-through.
pub fn load(start: &Path, flag: Option<&Path>) -> Result<Resolved> {
    let found = locate(start, flag, user_dir().as_deref());
    let Some((origin, path)) = found else {
        tracing::debug!("No configuration found, using defaults");
        return Ok(Resolved {
            origin: Origin::Builtin,
            path: None,
            config: Config::default(),
        });
    };

    let config = Config::from_file(&path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;
    Ok(Resolved {
        origin,
        path: Some(path),
        config,
    })
}

fn locate(start: &Path, flag: Option<&Path>, user_dir: Option<&Path>) -> Option<(Origin, PathBuf)> {
    if let Some(path) = flag {
        return Some((Origin::Flag, path.to_path_buf()));
    }

    let dir = if start.is_file() {
        start.parent().unwrap_or(start)
    } else {
        start
    };
    for ancestor in dir.ancestors() {
        if let Some(hit) = PROJECT_FILES
            .iter()
            .map(|name| ancestor.join(name))
            .find(|candidate| candidate.is_file())
        {
            return Some((Origin::Project, hit));
        }
        if ancestor.join(".git").exists() {
            break;
        }
    }

    user_dir
        .map(|dir| dir.join(USER_FILE))
        .filter(|candidate| candidate.is_file())
        .map(|candidate| (Origin::User, candidate))
}

/// `$DELTA_LINT_CONFIG_DIR`, else `~/.delta-lint`.
fn user_dir() -> Option<PathBuf> {
    std::env::var_os("DELTA_LINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".delta-lint")))
}
