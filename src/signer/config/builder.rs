//! Builder for constructing ToolchainConfig.

use super::ToolchainConfig;
use super::core::DEFAULT_ARTIFACT_EXTENSION;
use crate::signer::error::{ConfigError, Context};
use std::path::{Path, PathBuf};

/// Builder for constructing [`ToolchainConfig`] without a configuration file.
///
/// # Examples
///
/// ```
/// use signapk::signer::ToolchainConfigBuilder;
///
/// # fn example() -> Result<(), signapk::signer::ConfigError> {
/// let config = ToolchainConfigBuilder::new()
///     .runtime_home("/usr/lib/jvm/default")
///     .builder_path("/opt/apktool/apktool.jar")
///     .keystore_path("release.jks")
///     .keystore_alias("release")
///     .keystore_password("hunter2")
///     .build()?;
/// assert_eq!(config.artifact_extension(), "apk");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ToolchainConfigBuilder {
    runtime_home: Option<PathBuf>,
    builder_path: Option<PathBuf>,
    keystore_path: Option<PathBuf>,
    keystore_alias: Option<String>,
    keystore_password: Option<String>,
    artifact_extension: Option<String>,
}

impl ToolchainConfigBuilder {
    /// Creates a new config builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the Java runtime home.
    ///
    /// # Required
    pub fn runtime_home<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.runtime_home = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the builder archive path.
    ///
    /// # Required
    pub fn builder_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the keystore path.
    ///
    /// # Required
    pub fn keystore_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.keystore_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the key alias. Emptiness is checked at validation time.
    pub fn keystore_alias(mut self, alias: impl Into<String>) -> Self {
        self.keystore_alias = Some(alias.into());
        self
    }

    /// Sets the keystore password. Emptiness is checked at validation time.
    pub fn keystore_password(mut self, password: impl Into<String>) -> Self {
        self.keystore_password = Some(password.into());
        self
    }

    /// Sets the artifact extension.
    ///
    /// Default: `apk`
    pub fn artifact_extension(mut self, extension: impl Into<String>) -> Self {
        self.artifact_extension = Some(extension.into());
        self
    }

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if a path was never set. Missing
    /// credentials become empty strings so validation reports them as
    /// [`ConfigError::EmptyCredential`].
    pub fn build(self) -> Result<ToolchainConfig, ConfigError> {
        Ok(ToolchainConfig::new(
            self.runtime_home.context("runtime_home")?,
            self.builder_path.context("builder_path")?,
            self.keystore_path.context("keystore_path")?,
            self.keystore_alias.unwrap_or_default(),
            self.keystore_password.unwrap_or_default(),
            self.artifact_extension
                .unwrap_or_else(|| DEFAULT_ARTIFACT_EXTENSION.to_string()),
        ))
    }
}
