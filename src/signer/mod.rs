//! APK build-and-sign core.
//!
//! The signer drives two external tools: apktool (through the Java launcher)
//! to build an unsigned archive, then jarsigner to sign it.
//!
//! # Overview
//!
//! 1. [`ConfigValidator`] proves the [`ToolchainConfig`] is usable
//! 2. [`BuildStage`] runs the builder through the [`ProcessSupervisor`]
//! 3. [`SignStage`] runs the signer the same way
//! 4. [`Pipeline`] sequences the above and returns a [`PipelineReport`]
//!
//! # Module Organization
//!
//! - [`config`] - toolchain configuration, builder and file loading
//! - [`toolchain`] - executable discovery and validation
//! - [`process`] - external process supervision and output classification
//! - [`stages`] - build and sign command adapters
//! - [`pipeline`] - state machine, artifact paths and report
//! - [`error`] - error taxonomy

pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod stages;
pub mod toolchain;
pub mod utils;

pub use config::{ToolchainConfig, ToolchainConfigBuilder, discover, load_config};
pub use error::{ConfigError, CredentialField, Error, ExecutionError, InputError, Result};
pub use pipeline::{Pipeline, PipelineReport, PipelineRun, PipelineState};
pub use process::{ExecutionOutcome, FailureKind, ProcessSupervisor, ToolInvocation};
pub use stages::{BuildStage, SignStage};
pub use toolchain::{ConfigValidator, ValidatedToolchain};
