//! Version-control process runner.

use super::DiffError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs version-control queries.
///
/// Implementations block the calling thread until the query finishes or its
/// timeout elapses.
pub trait VcsBackend: Send + Sync {
    /// Runs the VCS binary with `args` and returns its standard output.
    ///
    /// When `timeout` elapses the process is killed and whatever output was
    /// captured so far is returned.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::Spawn`] if the process cannot be started and
    /// [`DiffError::CommandFailed`] on a non-zero exit status.
    fn run(&self, args: &[&str], timeout: Duration) -> Result<String, DiffError>;
}

/// [`VcsBackend`] that shells out to the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Creates a runner executing `git` inside `workdir`.
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Directory the commands run in.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    async fn run_async(&self, args: &[&str], timeout: Duration) -> Result<String, DiffError> {
        let command = format!("git {}", args.join(" "));
        debug!("Executing: {command}");

        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DiffError::Spawn {
                command: command.clone(),
                source,
            })?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut stdout_pipe = child.stdout.take();
        let mut stderr_pipe = child.stderr.take();

        let finished = tokio::time::timeout(timeout, async {
            let read_out = async {
                if let Some(pipe) = stdout_pipe.as_mut() {
                    let _ = pipe.read_to_end(&mut stdout).await;
                }
            };
            let read_err = async {
                if let Some(pipe) = stderr_pipe.as_mut() {
                    let _ = pipe.read_to_end(&mut stderr).await;
                }
            };
            let (_, _, status) = tokio::join!(read_out, read_err, child.wait());
            status
        })
        .await;

        match finished {
            Ok(Ok(status)) if status.success() => Ok(String::from_utf8_lossy(&stdout).into_owned()),
            Ok(Ok(status)) => Err(DiffError::CommandFailed {
                command,
                status: status.code(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            }),
            Ok(Err(source)) => Err(DiffError::Spawn { command, source }),
            Err(_) => {
                warn!(
                    "`{command}` did not finish within {}s; using captured output",
                    timeout.as_secs()
                );
                let _ = child.start_kill();
                Ok(String::from_utf8_lossy(&stdout).into_owned())
            }
        }
    }
}

impl VcsBackend for GitCli {
    fn run(&self, args: &[&str], timeout: Duration) -> Result<String, DiffError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()
            .map_err(DiffError::Runtime)?;
        runtime.block_on(self.run_async(args, timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_available() -> bool {
        std::process::Command::new("git")
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }

    #[test]
    fn non_zero_exit_is_command_failed() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path());

        let err = git
            .run(&["rev-parse", "--show-toplevel"], Duration::from_secs(20))
            .unwrap_err();

        match err {
            DiffError::CommandFailed { command, status, .. } => {
                assert_eq!(command, "git rev-parse --show-toplevel");
                assert_ne!(status, Some(0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn captures_standard_output() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path());

        let out = git.run(&["--version"], Duration::from_secs(20)).unwrap();
        assert!(out.starts_with("git version"));
    }

    #[test]
    fn missing_workdir_is_spawn_error() {
        let git = GitCli::new("/nonexistent/delta-lint/workdir");
        let err = git.run(&["status"], Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, DiffError::Spawn { .. }));
    }
}
