//! Core ToolchainConfig struct and implementations.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Extension used for produced artifacts when none is configured.
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "apk";

/// Locations and credentials of the external build and signing toolchain.
///
/// Deserialized from the JSON configuration file or constructed via
/// [`ToolchainConfigBuilder`](super::ToolchainConfigBuilder). The legacy keys
/// (`java_home`, `apk_tool`, `key_store`, `store_alias`, `store_password`) are
/// accepted as aliases.
///
/// # Examples
///
/// ```
/// use signapk::signer::ToolchainConfig;
///
/// let config: ToolchainConfig = serde_json::from_str(r#"{
///     "java_home": "/usr/lib/jvm/default",
///     "apk_tool": "/opt/apktool/apktool.jar",
///     "key_store": "/home/me/release.jks",
///     "store_alias": "release",
///     "store_password": "hunter2"
/// }"#).unwrap();
///
/// assert_eq!(config.keystore_alias(), "release");
/// assert_eq!(config.artifact_extension(), "apk");
/// ```
#[derive(Clone, Deserialize)]
pub struct ToolchainConfig {
    /// Java runtime home. Must contain `bin/java` and `bin/jarsigner`.
    #[serde(alias = "java_home")]
    runtime_home: PathBuf,

    /// Builder archive (apktool jar).
    #[serde(alias = "apk_tool")]
    builder_path: PathBuf,

    /// Keystore used for signing.
    #[serde(alias = "key_store")]
    keystore_path: PathBuf,

    /// Key alias inside the keystore.
    #[serde(alias = "store_alias")]
    keystore_alias: String,

    /// Keystore password.
    #[serde(alias = "store_password")]
    keystore_password: String,

    /// Extension of the intermediate and signed artifacts.
    #[serde(default = "default_artifact_extension")]
    artifact_extension: String,
}

fn default_artifact_extension() -> String {
    DEFAULT_ARTIFACT_EXTENSION.to_string()
}

impl ToolchainConfig {
    /// Returns the configured runtime home, before any fallback.
    pub fn runtime_home(&self) -> &Path {
        &self.runtime_home
    }

    /// Returns the builder archive path.
    pub fn builder_path(&self) -> &Path {
        &self.builder_path
    }

    /// Returns the keystore path.
    pub fn keystore_path(&self) -> &Path {
        &self.keystore_path
    }

    /// Returns the key alias.
    pub fn keystore_alias(&self) -> &str {
        &self.keystore_alias
    }

    /// Returns the keystore password.
    pub fn keystore_password(&self) -> &str {
        &self.keystore_password
    }

    /// Returns the artifact extension (without a leading dot).
    pub fn artifact_extension(&self) -> &str {
        &self.artifact_extension
    }

    /// Creates a new ToolchainConfig (used by ToolchainConfigBuilder).
    pub(super) fn new(
        runtime_home: PathBuf,
        builder_path: PathBuf,
        keystore_path: PathBuf,
        keystore_alias: String,
        keystore_password: String,
        artifact_extension: String,
    ) -> Self {
        Self {
            runtime_home,
            builder_path,
            keystore_path,
            keystore_alias,
            keystore_password,
            artifact_extension,
        }
    }
}

impl std::fmt::Debug for ToolchainConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolchainConfig")
            .field("runtime_home", &self.runtime_home)
            .field("builder_path", &self.builder_path)
            .field("keystore_path", &self.keystore_path)
            .field("keystore_alias", &self.keystore_alias)
            .field("keystore_password", &"<redacted>")
            .field("artifact_extension", &self.artifact_extension)
            .finish()
    }
}
