//! Toolchain configuration.
//!
//! A [`ToolchainConfig`] is read once at startup, either from a JSON file via
//! [`load_config`] or through [`ToolchainConfigBuilder`], and is immutable
//! afterwards. It is not trusted until
//! [`ConfigValidator`](crate::signer::toolchain::ConfigValidator) turns it into
//! a [`ValidatedToolchain`](crate::signer::toolchain::ValidatedToolchain).

mod builder;
mod core;
mod loader;

pub use builder::ToolchainConfigBuilder;
pub use core::{DEFAULT_ARTIFACT_EXTENSION, ToolchainConfig};
pub use loader::{CONFIG_ENV, DEFAULT_CONFIG_RELATIVE_PATH, candidate_paths, discover, load_config};
