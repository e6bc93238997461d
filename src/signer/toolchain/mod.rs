//! Toolchain discovery and validation.
//!
//! - [`detection`] - locating the launcher and signer under a runtime home
//! - [`validation`] - [`ConfigValidator`] and [`ValidatedToolchain`]

pub mod detection;
mod validation;

pub use detection::{RUNTIME_LAUNCHER, SIGNER};
pub use validation::{ConfigValidator, RUNTIME_HOME_ENV, ValidatedToolchain};
