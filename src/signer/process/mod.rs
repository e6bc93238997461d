//! External tool supervision.
//!
//! - [`invocation`] - executable plus argument vector, with secret redaction
//! - [`classifier`] - two-phase output classification
//! - [`outcome`] - [`ExecutionOutcome`] and failure kinds
//! - [`supervisor`] - [`ProcessSupervisor`], which spawns and drains the tool

pub mod classifier;
mod invocation;
mod outcome;
mod supervisor;

pub use classifier::{ERROR_MARKER, OutputLine, OutputStream};
pub use invocation::ToolInvocation;
pub use outcome::{ExecutionOutcome, ExitError, FailureKind};
pub use supervisor::ProcessSupervisor;
