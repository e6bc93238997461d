//! Error types for toolchain validation, process supervision and the pipeline.
//!
//! Every error is terminal to the current invocation. The top-level [`Error`]
//! records which pipeline step failed and wraps the precise cause.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for signer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Credential fields that must not be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    /// `keystore_password`
    KeystorePassword,
    /// `keystore_alias`
    KeystoreAlias,
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialField::KeystorePassword => f.write_str("keystore password"),
            CredentialField::KeystoreAlias => f.write_str("keystore alias"),
        }
    }
}

/// Missing or invalid toolchain configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file at any of the searched locations
    #[error("no configuration file found (searched: {})", display_paths(.searched))]
    NotFound {
        /// Locations checked, in order
        searched: Vec<PathBuf>,
    },

    /// Configuration file exists but could not be read
    #[error("cannot read configuration file {}: {source}", .path.display())]
    Unreadable {
        /// Configuration file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for a toolchain config
    #[error("malformed configuration file {}: {source}", .path.display())]
    Malformed {
        /// Configuration file path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Runtime launcher executable not found under the runtime home
    #[error("{} does not contain a `{name}` executable", .bin_dir.display())]
    MissingRuntime {
        /// Directory that was searched
        bin_dir: PathBuf,
        /// Executable name that was expected
        name: &'static str,
    },

    /// Signing executable not found under the runtime home
    #[error("{} does not contain a `{name}` executable", .bin_dir.display())]
    MissingSigner {
        /// Directory that was searched
        bin_dir: PathBuf,
        /// Executable name that was expected
        name: &'static str,
    },

    /// Builder archive missing or unreadable
    #[error("builder {} does not exist or is not readable: {reason}", .path.display())]
    MissingBuilder {
        /// Configured builder path
        path: PathBuf,
        /// Why the check failed
        reason: String,
    },

    /// Keystore missing or unreadable
    #[error("keystore {} does not exist or is not readable: {reason}", .path.display())]
    MissingKeystore {
        /// Configured keystore path
        path: PathBuf,
        /// Why the check failed
        reason: String,
    },

    /// Password or alias is empty
    #[error("{field} is empty")]
    EmptyCredential {
        /// Which credential
        field: CredentialField,
    },

    /// A required builder field was never set
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Invalid source directory.
#[derive(Error, Debug)]
pub enum InputError {
    /// Source path does not exist
    #[error("input path {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// Source path is not a directory
    #[error("input path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Source path has no final component to derive artifact names from
    #[error("input path {} has no usable directory name", .0.display())]
    NoFileName(PathBuf),
}

/// Failure of one external command.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The process could not be started
    #[error("failed to start `{command}`: {source}")]
    SpawnFailed {
        /// Redacted command line
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the process failed
    #[error("failed to wait for `{command}`: {source}")]
    WaitFailed {
        /// Redacted command line
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The process exited with a failure status
    #[error("`{command}` {}", describe_exit(.code))]
    NonZeroExit {
        /// Redacted command line
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// An output pipe could not be read to the end
    #[error("failed to read output of `{command}`: {source}")]
    OutputUnreadable {
        /// Redacted command line
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The process exited successfully but logged an error marker
    #[error("silent tool failure: `{command}` exited successfully but reported `{line}`")]
    SilentToolFailure {
        /// Redacted command line
        command: String,
        /// First output line that carried the error marker
        line: String,
    },

    /// The process succeeded but its expected output is absent
    #[error("`{command}` succeeded but did not produce {}", .path.display())]
    MissingArtifact {
        /// Redacted command line
        command: String,
        /// Expected artifact path
        path: PathBuf,
    },
}

/// Main error type for all signer operations
#[derive(Error, Debug)]
pub enum Error {
    /// Toolchain configuration is unusable
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Source directory is unusable
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Build stage failed
    #[error("build stage failed: {0}")]
    Build(#[source] ExecutionError),

    /// Sign stage failed
    #[error("sign stage failed: {0}")]
    Sign(#[source] ExecutionError),

    /// Filesystem operation failed
    #[error("IO error while {context} {}: {source}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Pipeline was asked to run a second time
    #[error("pipeline has already run (state: {0})")]
    AlreadyRun(crate::signer::pipeline::PipelineState),
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.into(),
            source,
        })
    }
}

/// Turn missing builder fields into configuration errors.
pub trait Context<T> {
    /// Returns [`ConfigError::MissingField`] when the value is absent.
    fn context(self, field: &'static str) -> std::result::Result<T, ConfigError>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, field: &'static str) -> std::result::Result<T, ConfigError> {
        self.ok_or(ConfigError::MissingField(field))
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_keeps_path_and_operation() {
        let err = std::fs::read("/definitely/not/here")
            .fs_context("reading artifact", "/definitely/not/here")
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("reading artifact"));
        assert!(message.contains("/definitely/not/here"));
    }

    #[test]
    fn exit_errors_describe_signals() {
        let err = ExecutionError::NonZeroExit {
            command: "java -jar apktool.jar".into(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by a signal"));
    }
}
