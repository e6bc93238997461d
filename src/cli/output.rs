//! User-facing terminal output.

use std::io::{self, Write};

/// Writes progress and result messages for the user.
///
/// Diagnostic detail goes through the `log` facade; this is for the short
/// status lines a user reads. Quiet mode suppresses all of them.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a message only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            writeln!(io::stdout(), "  {}", message)?;
        }
        Ok(())
    }

    /// Print a progress step.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.out(&format!("→ {}", message))
    }

    /// Print a success message.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.out(&format!("✓ {}", message))
    }

    /// Print indented text.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.out(&format!("  {}", message))
    }

    fn out(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout(), "{}", message)
    }
}
