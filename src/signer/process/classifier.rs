//! Output classification state machine.
//!
//! Tool output is consumed in two phases: every standard-output line first,
//! then every standard-error line. Each line is forwarded to the log and
//! checked for [`ERROR_MARKER`]. A hit marks the run as failed but draining
//! continues so later diagnostics still reach the log.
//!
//! ```text
//!   Stdout --end_of_stream--> Stderr --end_of_stream--> Finished
//! ```

/// Substring apktool prints on fatal errors even when it exits with status 0.
pub const ERROR_MARKER: &str = " error:";

/// Which pipe a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
}

/// One captured output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Source pipe
    pub stream: OutputStream,
    /// Line content without the trailing newline
    pub text: String,
}

/// Current drain phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainPhase {
    /// Consuming standard output
    Stdout,
    /// Standard output exhausted, consuming standard error
    Stderr,
    /// Both streams exhausted
    Finished,
}

/// Result of classifying a command's output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedOutput {
    /// True when any line carried [`ERROR_MARKER`]
    pub log_detected_error: bool,
    /// First line that carried [`ERROR_MARKER`]
    pub first_marker_line: Option<String>,
    /// All lines in drain order
    pub lines: Vec<OutputLine>,
}

/// Two-phase line classifier for one external command.
#[derive(Debug)]
pub struct OutputClassifier {
    tool: String,
    phase: DrainPhase,
    output: ClassifiedOutput,
}

impl OutputClassifier {
    /// Creates a classifier; `tool` prefixes forwarded log lines.
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            phase: DrainPhase::Stdout,
            output: ClassifiedOutput::default(),
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> DrainPhase {
        self.phase
    }

    /// Records one line from the stream of the current phase.
    pub fn observe(&mut self, line: String) {
        let stream = match self.phase {
            DrainPhase::Stdout => OutputStream::Stdout,
            DrainPhase::Stderr => OutputStream::Stderr,
            DrainPhase::Finished => {
                log::debug!("[{}] ignoring line after drain finished: {}", self.tool, line);
                return;
            }
        };

        match stream {
            OutputStream::Stdout => log::info!("[{}] {}", self.tool, line),
            OutputStream::Stderr => log::warn!("[{}] {}", self.tool, line),
        }

        if line.contains(ERROR_MARKER) {
            if !self.output.log_detected_error {
                self.output.first_marker_line = Some(line.clone());
            }
            self.output.log_detected_error = true;
        }

        self.output.lines.push(OutputLine { stream, text: line });
    }

    /// Marks the current stream as exhausted and advances the phase.
    pub fn end_of_stream(&mut self) {
        self.phase = match self.phase {
            DrainPhase::Stdout => DrainPhase::Stderr,
            DrainPhase::Stderr | DrainPhase::Finished => DrainPhase::Finished,
        };
    }

    /// Consumes the classifier and returns what it saw.
    pub fn finish(self) -> ClassifiedOutput {
        self.output
    }
}
