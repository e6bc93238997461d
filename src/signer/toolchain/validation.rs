//! Toolchain validation.
//!
//! Turns an untrusted [`ToolchainConfig`] into a [`ValidatedToolchain`]. Checks
//! run in a fixed order and the first failure is returned:
//!
//! 1. runtime launcher present under `<runtime_home>/bin`
//! 2. signer present under `<runtime_home>/bin`
//! 3. builder archive readable
//! 4. keystore readable
//! 5. keystore password non-empty
//! 6. keystore alias non-empty

use super::detection::{self, RUNTIME_LAUNCHER, SIGNER};
use crate::signer::config::ToolchainConfig;
use crate::signer::error::{ConfigError, CredentialField};
use std::path::{Path, PathBuf};

/// Environment variable consulted when the configured runtime home is absent.
pub const RUNTIME_HOME_ENV: &str = "JAVA_HOME";

/// A toolchain whose executables, files and credentials have been checked.
///
/// Only obtainable from [`ConfigValidator::validate`].
#[derive(Clone)]
pub struct ValidatedToolchain {
    runtime_home: PathBuf,
    launcher: PathBuf,
    signer: PathBuf,
    builder: PathBuf,
    keystore: PathBuf,
    alias: String,
    password: String,
    artifact_extension: String,
}

impl ValidatedToolchain {
    /// Runtime home after fallback resolution.
    pub fn runtime_home(&self) -> &Path {
        &self.runtime_home
    }

    /// Located runtime launcher executable.
    pub fn launcher(&self) -> &Path {
        &self.launcher
    }

    /// Located signing executable.
    pub fn signer(&self) -> &Path {
        &self.signer
    }

    /// Builder archive.
    pub fn builder(&self) -> &Path {
        &self.builder
    }

    /// Keystore file.
    pub fn keystore(&self) -> &Path {
        &self.keystore
    }

    /// Key alias.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Keystore password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Artifact extension without leading dot.
    pub fn artifact_extension(&self) -> &str {
        &self.artifact_extension
    }
}

impl std::fmt::Debug for ValidatedToolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedToolchain")
            .field("runtime_home", &self.runtime_home)
            .field("launcher", &self.launcher)
            .field("signer", &self.signer)
            .field("builder", &self.builder)
            .field("keystore", &self.keystore)
            .field("alias", &self.alias)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validates toolchain configurations.
///
/// Holds the runtime-home fallback so validation never reads the process
/// environment itself; [`ConfigValidator::from_env`] captures `JAVA_HOME` once.
#[derive(Debug, Clone, Default)]
pub struct ConfigValidator {
    runtime_home_fallback: Option<PathBuf>,
}

impl ConfigValidator {
    /// Creates a validator without a runtime-home fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator that falls back to `$JAVA_HOME`.
    pub fn from_env() -> Self {
        Self {
            runtime_home_fallback: std::env::var_os(RUNTIME_HOME_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Sets the runtime home used when the configured one does not exist.
    pub fn with_runtime_home_fallback(mut self, fallback: impl Into<PathBuf>) -> Self {
        self.runtime_home_fallback = Some(fallback.into());
        self
    }

    /// Resolves the runtime home, applying the fallback at most once.
    ///
    /// The configured value wins whenever it exists. Without a fallback the
    /// configured value is kept and validation reports the missing executables.
    pub fn resolve_runtime_home(&self, configured: &Path) -> PathBuf {
        if configured.exists() {
            return configured.to_path_buf();
        }

        match &self.runtime_home_fallback {
            Some(fallback) => {
                log::info!(
                    "Runtime home {} does not exist, using {} from ${}",
                    configured.display(),
                    fallback.display(),
                    RUNTIME_HOME_ENV
                );
                fallback.clone()
            }
            None => configured.to_path_buf(),
        }
    }

    /// Validates `config`, returning the first failed check.
    ///
    /// Validation has no side effects; calling it repeatedly on an unchanged
    /// configuration yields the same result.
    pub fn validate(&self, config: &ToolchainConfig) -> Result<ValidatedToolchain, ConfigError> {
        let runtime_home = self.resolve_runtime_home(config.runtime_home());
        let bin_dir = detection::bin_dir(&runtime_home);
        let detected = detection::scan_executables(&bin_dir);

        let launcher = detected.launcher.ok_or_else(|| ConfigError::MissingRuntime {
            bin_dir: bin_dir.clone(),
            name: RUNTIME_LAUNCHER,
        })?;
        let signer = detected.signer.ok_or_else(|| ConfigError::MissingSigner {
            bin_dir: bin_dir.clone(),
            name: SIGNER,
        })?;

        check_readable(config.builder_path()).map_err(|reason| ConfigError::MissingBuilder {
            path: config.builder_path().to_path_buf(),
            reason,
        })?;
        check_readable(config.keystore_path()).map_err(|reason| ConfigError::MissingKeystore {
            path: config.keystore_path().to_path_buf(),
            reason,
        })?;

        if config.keystore_password().is_empty() {
            return Err(ConfigError::EmptyCredential {
                field: CredentialField::KeystorePassword,
            });
        }
        if config.keystore_alias().is_empty() {
            return Err(ConfigError::EmptyCredential {
                field: CredentialField::KeystoreAlias,
            });
        }

        Ok(ValidatedToolchain {
            runtime_home,
            launcher,
            signer,
            builder: config.builder_path().to_path_buf(),
            keystore: config.keystore_path().to_path_buf(),
            alias: config.keystore_alias().to_string(),
            password: config.keystore_password().to_string(),
            artifact_extension: config.artifact_extension().to_string(),
        })
    }
}

/// Checks that `path` is a file that can be opened for reading.
fn check_readable(path: &Path) -> Result<(), String> {
    let metadata = std::fs::metadata(path).map_err(|e| e.to_string())?;
    if metadata.is_dir() {
        return Err("path is a directory".to_string());
    }
    std::fs::File::open(path).map(|_| ()).map_err(|e| e.to_string())
}
