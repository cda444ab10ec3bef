//! Execution of cutechess-cli.
//!
//! The [`MatchRunner`] trait is the boundary between the adapter and the
//! match runner process. [`ProcessRunner`] is the real implementation; tests
//! substitute canned output.

use std::process::ExitStatus;
use thiserror::Error;

use crate::command::CutechessCommand;

/// Errors that can occur while running cutechess-cli.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The process could not be started or its output could not be read.
    #[error("failed to execute command: {command}: {source}")]
    SpawnError {
        /// Rendered command line.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The process exited unsuccessfully.
    #[error("failed to execute command: {command} ({status})")]
    ExitFailure {
        /// Rendered command line.
        command: String,
        /// Exit status reported by the operating system.
        status: ExitStatus,
    },
}

/// Plays one game and returns the match runner's standard output.
pub trait MatchRunner {
    /// Runs `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns a [`RunnerError`] if the process cannot be run or exits with
    /// a non-zero status.
    fn run(&self, command: &CutechessCommand) -> Result<String, RunnerError>;
}

/// Runs cutechess-cli as a child process and waits for it.
///
/// There is no timeout; time control and adjudication are left to
/// cutechess-cli's own options.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl MatchRunner for ProcessRunner {
    fn run(&self, command: &CutechessCommand) -> Result<String, RunnerError> {
        tracing::debug!(command = %command, "starting cutechess-cli");

        let output = command
            .to_command()
            .output()
            .map_err(|source| RunnerError::SpawnError {
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(RunnerError::ExitFailure {
                command: command.to_string(),
                status: output.status,
            });
        }

        tracing::debug!(bytes = output.stdout.len(), "cutechess-cli finished");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
