//! Per-command execution outcome.

use super::classifier::{ClassifiedOutput, OutputLine, OutputStream};
use crate::signer::error::ExecutionError;
use std::process::ExitStatus;

/// Why a process did not finish with a success status.
#[derive(Debug)]
pub enum ExitError {
    /// The process could not be started
    Spawn(std::io::Error),
    /// The exit status could not be obtained
    Wait(std::io::Error),
    /// The process exited with a failure status
    Status(ExitStatus),
}

/// Failure classification of an [`ExecutionOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Process never started
    SpawnFailed,
    /// Exit status unobtainable
    WaitFailed,
    /// Nonzero exit or killed by a signal
    ExitStatus,
    /// Clean exit but an output pipe could not be read to the end
    OutputUnreadable,
    /// Zero exit status but an error marker was logged
    SilentToolFailure,
}

/// Outcome of one supervised command.
///
/// Successful only when there is no exit error, both pipes were read to the
/// end and no error marker was logged. Precedence when several apply: exit
/// error, then read error, then log-detected error. An unread tail could hide
/// a marker, so a read error is a failure in its own right.
#[derive(Debug)]
pub struct ExecutionOutcome {
    command: String,
    exit_error: Option<ExitError>,
    read_error: Option<std::io::Error>,
    output: ClassifiedOutput,
}

impl ExecutionOutcome {
    pub(super) fn new(
        command: String,
        exit_error: Option<ExitError>,
        read_error: Option<std::io::Error>,
        output: ClassifiedOutput,
    ) -> Self {
        Self {
            command,
            exit_error,
            read_error,
            output,
        }
    }

    pub(super) fn spawn_failed(command: String, error: std::io::Error) -> Self {
        Self::new(
            command,
            Some(ExitError::Spawn(error)),
            None,
            ClassifiedOutput::default(),
        )
    }

    /// Redacted command line.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Exit error, if any.
    pub fn exit_error(&self) -> Option<&ExitError> {
        self.exit_error.as_ref()
    }

    /// First error hit while reading the output pipes.
    pub fn read_error(&self) -> Option<&std::io::Error> {
        self.read_error.as_ref()
    }

    /// Whether an error marker appeared in the output.
    pub fn log_detected_error(&self) -> bool {
        self.output.log_detected_error
    }

    /// First output line that carried the error marker.
    pub fn first_marker_line(&self) -> Option<&str> {
        self.output.first_marker_line.as_deref()
    }

    /// All captured lines in drain order.
    pub fn lines(&self) -> &[OutputLine] {
        &self.output.lines
    }

    /// Captured lines of one stream.
    pub fn stream_lines(&self, stream: OutputStream) -> impl Iterator<Item = &str> {
        self.output
            .lines
            .iter()
            .filter(move |l| l.stream == stream)
            .map(|l| l.text.as_str())
    }

    /// True when no failure kind applies.
    pub fn is_success(&self) -> bool {
        self.failure_kind().is_none()
    }

    /// Classifies the failure, if any.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.exit_error {
            Some(ExitError::Spawn(_)) => Some(FailureKind::SpawnFailed),
            Some(ExitError::Wait(_)) => Some(FailureKind::WaitFailed),
            Some(ExitError::Status(_)) => Some(FailureKind::ExitStatus),
            None if self.read_error.is_some() => Some(FailureKind::OutputUnreadable),
            None if self.output.log_detected_error => Some(FailureKind::SilentToolFailure),
            None => None,
        }
    }

    /// Converts the outcome into a result.
    pub fn into_result(self) -> Result<(), ExecutionError> {
        let command = self.command;
        match self.exit_error {
            Some(ExitError::Spawn(source)) => Err(ExecutionError::SpawnFailed { command, source }),
            Some(ExitError::Wait(source)) => Err(ExecutionError::WaitFailed { command, source }),
            Some(ExitError::Status(status)) => Err(ExecutionError::NonZeroExit {
                command,
                code: status.code(),
            }),
            None => match self.read_error {
                Some(source) => Err(ExecutionError::OutputUnreadable { command, source }),
                None if self.output.log_detected_error => Err(ExecutionError::SilentToolFailure {
                    command,
                    line: self.output.first_marker_line.unwrap_or_default(),
                }),
                None => Ok(()),
            },
        }
    }
}
