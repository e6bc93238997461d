//! Configuration file discovery and parsing.

use super::ToolchainConfig;
use crate::signer::error::ConfigError;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "SIGNAPK_CONFIG";

/// Configuration file location relative to the working directory.
pub const DEFAULT_CONFIG_RELATIVE_PATH: &str = "signapk/env.conf";

/// Returns the implicit configuration locations, in lookup order.
///
/// 1. `<working_dir>/signapk/env.conf`
/// 2. `<user config dir>/signapk/env.conf`
pub fn candidate_paths(working_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![working_dir.join(DEFAULT_CONFIG_RELATIVE_PATH)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join(DEFAULT_CONFIG_RELATIVE_PATH));
    }
    candidates
}

/// Resolves which configuration file to load.
///
/// An explicit path (from `--config` or [`CONFIG_ENV`]) is used as-is and must
/// exist. Otherwise the first existing entry of [`candidate_paths`] wins.
pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<PathBuf, ConfigError> {
    let searched = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => candidate_paths(working_dir),
    };

    match searched.iter().find(|p| p.is_file()) {
        Some(found) => {
            log::debug!("Using configuration file {}", found.display());
            Ok(found.clone())
        }
        None => Err(ConfigError::NotFound { searched }),
    }
}

/// Reads and parses a JSON configuration file.
///
/// ```json
/// {
///     "runtime_home": "/usr/lib/jvm/default",
///     "builder_path": "/opt/apktool/apktool.jar",
///     "keystore_path": "/home/me/release.jks",
///     "keystore_alias": "release",
///     "keystore_password": "..."
/// }
/// ```
pub fn load_config(path: &Path) -> Result<ToolchainConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let config: ToolchainConfig =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!(
        "runtime home: {}, builder: {}, keystore: {}, alias: {}",
        config.runtime_home().display(),
        config.builder_path().display(),
        config.keystore_path().display(),
        config.keystore_alias()
    );

    Ok(config)
}
