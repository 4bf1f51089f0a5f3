//! External process invocation
//!
//! A thin facade over "run an executable with arguments in a directory".
//! The child inherits standard streams so tool output stays live, and the
//! caller blocks until it exits. Ctrl-C while waiting is the user stopping
//! the operation, not a failure.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;
use tokio::signal;
use tracing::debug;

use crate::config::Config;

/// How a child process finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The child ran to completion with a zero exit status
    Completed,
    /// The user interrupted the run; treated as a clean, silent stop
    Interrupted,
}

impl RunOutcome {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, RunOutcome::Interrupted)
    }
}

/// Process-invocation errors
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The executable could not be located; carries a remediation message
    #[error("{hint}")]
    MissingBinary { hint: String },

    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("failed waiting for `{program}`: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    /// The child exited with a non-zero status
    #[error("`{program}` exited with {status}")]
    CommandFailed { program: String, status: ExitStatus },
}

/// Runs one external executable in a fixed working directory
#[derive(Debug, Clone)]
pub struct Runner {
    program: String,
    cwd: PathBuf,
    missing_hint: String,
}

impl Runner {
    pub fn new(
        program: impl Into<String>,
        cwd: impl Into<PathBuf>,
        missing_hint: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            cwd: cwd.into(),
            missing_hint: missing_hint.into(),
        }
    }

    /// Runner for the configured npm executable
    pub fn npm(config: &Config, cwd: impl Into<PathBuf>) -> Self {
        Self::new(
            &config.tailwind.npm_bin_path,
            cwd,
            "It looks like node.js and/or npm is not installed or cannot be found.\n\
             \n\
             Visit https://nodejs.org to download and install node.js for your system.\n\
             \n\
             If you have npm installed and still get this message, set npm_bin_path in\n\
             tailbridge.toml to the path of the npm executable on your system, e.g.\n\
             \n\
             [tailwind]\n\
             npm_bin_path = \"/usr/local/bin/npm\"",
        )
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Spawn the program with `args`, inheriting stdio, and wait for it.
    ///
    /// A missing binary becomes [`RunnerError::MissingBinary`]; a non-zero
    /// exit becomes [`RunnerError::CommandFailed`]; Ctrl-C while waiting
    /// resolves to [`RunOutcome::Interrupted`] once the child (which shares
    /// the terminal's signal) has wound down.
    pub async fn run(&self, args: &[&str]) -> Result<RunOutcome, RunnerError> {
        debug!("running {} {}", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => RunnerError::MissingBinary {
                    hint: self.missing_hint.clone(),
                },
                _ => RunnerError::Spawn {
                    program: self.program.clone(),
                    source,
                },
            })?;

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|source| RunnerError::Wait {
                    program: self.program.clone(),
                    source,
                })?;
                if status.success() {
                    Ok(RunOutcome::Completed)
                } else {
                    Err(RunnerError::CommandFailed {
                        program: self.program.clone(),
                        status,
                    })
                }
            }
            _ = signal::ctrl_c() => {
                // The child shares the foreground process group and receives
                // the same SIGINT; let it finish shutting down.
                let _ = child.wait().await;
                Ok(RunOutcome::Interrupted)
            }
        }
    }
}

/// Drive `operation` to completion unless the user interrupts it.
///
/// Resolves to `None` on Ctrl-C, mirroring how [`Runner::run`] treats an
/// interrupt as a clean stop rather than a failure. Used by operations
/// that block on something other than a child process, like a download.
pub async fn interruptible<T>(operation: impl std::future::Future<Output = T>) -> Option<T> {
    tokio::select! {
        value = operation => Some(value),
        _ = signal::ctrl_c() => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_interruptible_passes_through_completion() {
        assert_eq!(interruptible(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_missing_binary_yields_remediation() {
        let runner = Runner::new(
            "definitely-not-a-real-binary-1b5e",
            std::env::temp_dir(),
            "install the thing first",
        );
        let err = runner.run(&[]).await.unwrap_err();
        assert!(matches!(err, RunnerError::MissingBinary { .. }));
        assert_eq!(err.to_string(), "install the thing first");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_completes() {
        let runner = Runner::new("true", std::env::temp_dir(), "");
        let outcome = runner.run(&[]).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_surfaced() {
        let runner = Runner::new("false", std::env::temp_dir(), "");
        let err = runner.run(&[]).await.unwrap_err();
        assert!(matches!(err, RunnerError::CommandFailed { .. }));
    }
}
