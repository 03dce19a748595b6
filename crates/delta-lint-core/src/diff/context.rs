//! Per-run, memoized access to version-control state.

use super::change::ChangeSet;
use super::git::{GitCli, VcsBackend};
use super::parse::{parse_name_only, parse_unified_diff};
use super::DiffError;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Timeout for `git fetch`.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for every other query.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(20);

const DIFF_ARGS: [&str; 4] = ["diff", "--no-color", "--no-ext-diff", "--unified=0"];

enum Source {
    Vcs(Box<dyn VcsBackend>),
    Fixed {
        changes: Arc<ChangeSet>,
        root: Option<PathBuf>,
    },
}

/// Outcome of a finished query; a failure keeps only its message.
type Memo<T> = Option<Result<T, String>>;

/// Returns the memoized outcome in `slot`, computing it on first use.
///
/// A failure is stored as well, so a failed query never runs twice. The
/// first caller gets the original error, later ones get
/// [`DiffError::FailedEarlier`].
fn memoize<T: Clone>(
    slot: &mut Memo<T>,
    query: &'static str,
    compute: impl FnOnce() -> Result<T, DiffError>,
) -> Result<T, DiffError> {
    match slot {
        Some(Ok(hit)) => return Ok(hit.clone()),
        Some(Err(message)) => {
            return Err(DiffError::FailedEarlier {
                query,
                message: message.clone(),
            })
        }
        None => {}
    }
    match compute() {
        Ok(value) => {
            *slot = Some(Ok(value.clone()));
            Ok(value)
        }
        Err(e) => {
            *slot = Some(Err(e.to_string()));
            Err(e)
        }
    }
}

/// State shared by every check during one execution.
///
/// Holds the diff source and memoizes each query so it runs at most once per
/// run, even when many workers ask for it at the same time. Each cache is
/// locked for the whole computation of a missing entry. Failures are
/// memoized too: once a query fails, every later call reports that failure
/// without starting git again.
pub struct RunContext {
    source: Source,
    fetch: Mutex<Memo<()>>,
    changes: Mutex<HashMap<String, Memo<Arc<ChangeSet>>>>,
    changed_paths: Mutex<HashMap<String, Memo<Arc<BTreeSet<String>>>>>,
    allowlists: Mutex<HashMap<(String, Vec<String>), Memo<Arc<BTreeSet<String>>>>>,
    repo_root: Mutex<Memo<PathBuf>>,
    current_branch: Mutex<Memo<String>>,
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            Source::Vcs(_) => "vcs",
            Source::Fixed { .. } => "fixed",
        };
        f.debug_struct("RunContext").field("source", &source).finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl RunContext {
    /// Context backed by the `git` binary running in `workdir`.
    #[must_use]
    pub fn git(workdir: impl Into<PathBuf>) -> Self {
        Self::with_backend(GitCli::new(workdir))
    }

    /// Context backed by an arbitrary [`VcsBackend`].
    #[must_use]
    pub fn with_backend(backend: impl VcsBackend + 'static) -> Self {
        Self::from_source(Source::Vcs(Box::new(backend)))
    }

    /// Offline context serving a fixed change set.
    ///
    /// No process is ever started. The same set is returned for every base
    /// branch, and [`RunContext::repo_root`] and [`RunContext::current_branch`]
    /// are unavailable unless a root is set with [`RunContext::with_root`].
    #[must_use]
    pub fn with_changes(changes: ChangeSet) -> Self {
        Self::from_source(Source::Fixed {
            changes: Arc::new(changes),
            root: None,
        })
    }

    /// Sets the repository root of an offline context.
    ///
    /// Has no effect on a VCS-backed context.
    #[must_use]
    pub fn with_root(mut self, path: impl Into<PathBuf>) -> Self {
        if let Source::Fixed { root, .. } = &mut self.source {
            *root = Some(path.into());
        }
        self
    }

    fn from_source(source: Source) -> Self {
        Self {
            source,
            fetch: Mutex::new(None),
            changes: Mutex::new(HashMap::new()),
            changed_paths: Mutex::new(HashMap::new()),
            allowlists: Mutex::new(HashMap::new()),
            repo_root: Mutex::new(None),
            current_branch: Mutex::new(None),
        }
    }

    /// Whether this context serves a fixed change set.
    #[must_use]
    pub fn is_offline(&self) -> bool {
        matches!(self.source, Source::Fixed { .. })
    }

    /// Changed files and lines relative to `base`.
    ///
    /// Unions the working-tree diff against `HEAD` with the branch diff
    /// against `origin/<base>...`. A fetch runs before the branch diff, once
    /// per run.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError`] if any git query fails.
    pub fn changes(&self, base: &str) -> Result<Arc<ChangeSet>, DiffError> {
        let backend = match &self.source {
            Source::Fixed { changes, .. } => return Ok(Arc::clone(changes)),
            Source::Vcs(backend) => backend.as_ref(),
        };

        let mut cache = lock(&self.changes);
        memoize(cache.entry(base.to_string()).or_default(), "changed lines", || {
            self.warn_if_on_base(base)?;

            let mut args = DIFF_ARGS.to_vec();
            args.push("HEAD");
            let mut set = parse_unified_diff(&backend.run(&args, QUERY_TIMEOUT)?);

            self.ensure_fetched(backend)?;
            let base_ref = base_ref(base);
            let mut args = DIFF_ARGS.to_vec();
            args.push(&base_ref);
            set.extend(parse_unified_diff(&backend.run(&args, QUERY_TIMEOUT)?));

            info!("Collected changes for {} file(s) against {base_ref}", set.len());
            Ok(Arc::new(set))
        })
    }

    /// Repository-relative paths changed relative to `base`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError`] if any git query fails.
    pub fn changed_paths(&self, base: &str) -> Result<Arc<BTreeSet<String>>, DiffError> {
        let backend = match &self.source {
            Source::Fixed { changes, .. } => {
                return Ok(Arc::new(
                    changes
                        .paths()
                        .map(|p| p.to_string_lossy().into_owned())
                        .collect(),
                ))
            }
            Source::Vcs(backend) => backend.as_ref(),
        };

        let mut cache = lock(&self.changed_paths);
        memoize(cache.entry(base.to_string()).or_default(), "changed paths", || {
            let mut paths =
                parse_name_only(&backend.run(&["diff", "--name-only", "HEAD"], QUERY_TIMEOUT)?);
            self.ensure_fetched(backend)?;
            let base_ref = base_ref(base);
            paths.extend(parse_name_only(
                &backend.run(&["diff", "--name-only", &base_ref], QUERY_TIMEOUT)?,
            ));

            debug!("{} changed path(s) against {base_ref}", paths.len());
            Ok(Arc::new(paths))
        })
    }

    /// File names of changed files with one of `extensions` that still exist.
    ///
    /// Extensions include their leading dot (e.g., `".java"`). Existence is
    /// checked under the repository root; an offline context without a root
    /// skips that check.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError`] if any git query fails.
    pub fn changed_file_names(
        &self,
        base: &str,
        extensions: &[String],
    ) -> Result<Arc<BTreeSet<String>>, DiffError> {
        let key = (base.to_string(), extensions.to_vec());
        let mut cache = lock(&self.allowlists);
        memoize(cache.entry(key).or_default(), "changed file names", || {
            let paths = self.changed_paths(base)?;
            let root = match &self.source {
                Source::Fixed { root, .. } => root.clone(),
                Source::Vcs(_) => Some(self.repo_root()?),
            };

            let names: BTreeSet<String> = paths
                .iter()
                .filter(|p| extensions.iter().any(|ext| p.ends_with(ext.as_str())))
                .filter(|p| root.as_ref().map_or(true, |r| r.join(p).exists()))
                .filter_map(|p| Path::new(p).file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();

            debug!("Allowlist for {base} {extensions:?}: {names:?}");
            Ok(Arc::new(names))
        })
    }

    /// Top-level directory of the repository.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError`] if the query fails or, offline, no root was set.
    pub fn repo_root(&self) -> Result<PathBuf, DiffError> {
        let backend = match &self.source {
            Source::Fixed { root, .. } => {
                return root.clone().ok_or(DiffError::Unavailable {
                    query: "repository root",
                })
            }
            Source::Vcs(backend) => backend.as_ref(),
        };

        memoize(&mut *lock(&self.repo_root), "repository root", || {
            let output = backend.run(&["rev-parse", "--show-toplevel"], QUERY_TIMEOUT)?;
            Ok(PathBuf::from(output.trim()))
        })
    }

    /// Name of the checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError`] if the query fails or the context is offline.
    pub fn current_branch(&self) -> Result<String, DiffError> {
        let Source::Vcs(backend) = &self.source else {
            return Err(DiffError::Unavailable {
                query: "current branch",
            });
        };

        memoize(&mut *lock(&self.current_branch), "current branch", || {
            let output = backend.run(&["rev-parse", "--abbrev-ref", "HEAD"], QUERY_TIMEOUT)?;
            Ok(output.trim().to_string())
        })
    }

    fn warn_if_on_base(&self, base: &str) -> Result<(), DiffError> {
        if self.current_branch()? == base {
            warn!("Current branch is the base branch `{base}`; only uncommitted changes will differ");
        }
        Ok(())
    }

    fn ensure_fetched(&self, backend: &dyn VcsBackend) -> Result<(), DiffError> {
        memoize(&mut *lock(&self.fetch), "remote fetch", || {
            info!("Fetching remote refs");
            backend.run(&["fetch"], FETCH_TIMEOUT).map(drop)
        })
    }
}

fn base_ref(base: &str) -> String {
    format!("origin/{base}...")
}
