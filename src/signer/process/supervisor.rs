//! External process execution and output supervision.

use super::classifier::OutputClassifier;
use super::invocation::ToolInvocation;
use super::outcome::{ExecutionOutcome, ExitError};
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Runs external tools and classifies their outcome.
///
/// A tool fails when it cannot be started, when its exit status is not
/// success, or when its output contains the error marker. The last case
/// catches apktool, which exits with status 0 after logging fatal errors.
///
/// Standard output is classified as it arrives. Standard error is collected
/// concurrently so neither pipe can fill up and stall the child, and is
/// classified once standard output is exhausted. Logged order is therefore
/// all stdout lines followed by all stderr lines. A pipe that fails mid-read
/// is recorded in the outcome and fails the run.
///
/// There is no timeout: a tool that never exits blocks [`ProcessSupervisor::run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSupervisor;

impl ProcessSupervisor {
    /// Creates a supervisor.
    pub fn new() -> Self {
        Self
    }

    /// Runs `invocation` to completion.
    ///
    /// Never returns an error directly; spawn and wait failures are recorded
    /// in the returned [`ExecutionOutcome`].
    pub async fn run(&self, invocation: &ToolInvocation) -> ExecutionOutcome {
        let command = invocation.to_string();
        log::info!("Running: {}", command);

        let mut child = match Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                log::error!("Failed to start {}: {}", invocation.program().display(), e);
                return ExecutionOutcome::spawn_failed(command, e);
            }
        };

        let mut classifier = OutputClassifier::new(invocation.tool_name());
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Phase one streams stdout while stderr is buffered in the background
        let (stdout_result, stderr_result) = tokio::join!(
            async {
                if let Some(stdout) = stdout {
                    let mut reader = BufReader::new(stdout);
                    while let Some(line) = next_line(&mut reader).await? {
                        classifier.observe(line);
                    }
                }
                Ok::<(), std::io::Error>(())
            },
            collect_lines(stderr)
        );

        let mut read_error = None;
        if let Err(e) = stdout_result {
            log::warn!("Stopped reading stdout of {}: {}", command, e);
            read_error = Some(e);
        }
        classifier.end_of_stream();

        let (stderr_lines, stderr_error) = stderr_result;
        stderr_lines
            .into_iter()
            .for_each(|line| classifier.observe(line));
        if let Some(e) = stderr_error {
            log::warn!("Stopped reading stderr of {}: {}", command, e);
            read_error.get_or_insert(e);
        }
        classifier.end_of_stream();

        let exit_error = match child.wait().await {
            Ok(status) if status.success() => None,
            Ok(status) => {
                log::debug!("{} exited with {}", invocation.tool_name(), status);
                Some(ExitError::Status(status))
            }
            Err(e) => Some(ExitError::Wait(e)),
        };

        ExecutionOutcome::new(command, exit_error, read_error, classifier.finish())
    }
}

/// Reads every line of an optional pipe.
///
/// Lines read before an IO error are kept and returned with the error.
async fn collect_lines<R: AsyncRead + Unpin>(
    pipe: Option<R>,
) -> (Vec<String>, Option<std::io::Error>) {
    let mut lines = Vec::new();
    if let Some(pipe) = pipe {
        let mut reader = BufReader::new(pipe);
        loop {
            match next_line(&mut reader).await {
                Ok(Some(line)) => lines.push(line),
                Ok(None) => break,
                Err(e) => return (lines, Some(e)),
            }
        }
    }
    (lines, None)
}

/// Reads one line, decoding invalid UTF-8 lossily and stripping the line ending.
async fn next_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
