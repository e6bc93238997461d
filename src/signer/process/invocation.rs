//! External command description.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder printed instead of secret arguments.
const REDACTED: &str = "********";

/// An executable and its argument vector.
///
/// Arguments are kept as separate `OsString`s and handed to the OS unchanged,
/// so paths containing spaces or non-UTF-8 bytes stay single arguments.
/// Arguments added with [`ToolInvocation::secret_arg`] are masked by the
/// `Display` implementation used for logs and error messages.
#[derive(Clone)]
pub struct ToolInvocation {
    program: PathBuf,
    args: Vec<OsString>,
    secret_indices: Vec<usize>,
}

impl ToolInvocation {
    /// Creates an invocation of `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            secret_indices: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends one argument that must never be printed.
    pub fn secret_arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.secret_indices.push(self.args.len());
        self.arg(arg)
    }

    /// Executable path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Argument vector, excluding the program.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Short tool name used to prefix forwarded output lines.
    pub fn tool_name(&self) -> String {
        self.program
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.program.as_os_str().to_string_lossy())?;
        for (i, arg) in self.args.iter().enumerate() {
            f.write_str(" ")?;
            if self.secret_indices.contains(&i) {
                f.write_str(REDACTED)?;
            } else {
                write_quoted(f, &arg.to_string_lossy())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ToolInvocation({})", self)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if value.is_empty() || value.contains(char::is_whitespace) {
        write!(f, "'{}'", value.replace('\'', "'\\''"))
    } else {
        f.write_str(value)
    }
}
