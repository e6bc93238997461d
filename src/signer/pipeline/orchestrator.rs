//! Main pipeline orchestration.
//!
//! This module provides the [`Pipeline`] that validates the toolchain, builds
//! the unsigned artifact and signs it, strictly in that order.

use super::report::{PipelineReport, checksum_file};
use super::run::PipelineRun;
use super::state::PipelineState;
use crate::signer::config::ToolchainConfig;
use crate::signer::error::{Error, Result};
use crate::signer::process::ProcessSupervisor;
use crate::signer::stages::{BuildStage, SignStage};
use crate::signer::toolchain::ConfigValidator;
use crate::signer::utils::fs::remove_file_if_exists;
use std::path::Path;

/// Single-use build-and-sign pipeline.
///
/// Owns its [`ToolchainConfig`], so several pipelines with different
/// configurations can coexist in one process. A pipeline runs at most once;
/// a second [`Pipeline::run`] is rejected with [`Error::AlreadyRun`].
///
/// # Examples
///
/// ```no_run
/// use signapk::signer::{Pipeline, load_config};
/// use std::path::Path;
///
/// # async fn example() -> signapk::signer::Result<()> {
/// let config = load_config(Path::new("signapk/env.conf"))?;
/// let mut pipeline = Pipeline::new(config);
/// let report = pipeline.run(Path::new("./app")).await?;
/// println!("Signed: {}", report.signed_artifact.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Pipeline {
    config: ToolchainConfig,
    validator: ConfigValidator,
    supervisor: ProcessSupervisor,
    state: PipelineState,
}

impl Pipeline {
    /// Creates a pipeline whose validator falls back to `$JAVA_HOME`.
    pub fn new(config: ToolchainConfig) -> Self {
        Self::with_validator(config, ConfigValidator::from_env())
    }

    /// Creates a pipeline with an explicit validator.
    pub fn with_validator(config: ToolchainConfig, validator: ConfigValidator) -> Self {
        Self {
            config,
            validator,
            supervisor: ProcessSupervisor::new(),
            state: PipelineState::Init,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Returns the toolchain configuration.
    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// Builds and signs `source_dir`.
    ///
    /// # Returns
    ///
    /// A [`PipelineReport`] whose `signed_artifact` is the final artifact path.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if validation fails; no process is spawned
    /// - [`Error::Input`] if `source_dir` is missing or not a directory; no
    ///   process is spawned
    /// - [`Error::Build`] / [`Error::Sign`] if a stage fails
    /// - [`Error::Fs`] if the signed artifact cannot be hashed; it is removed
    /// - [`Error::AlreadyRun`] if this pipeline already ran
    pub async fn run(&mut self, source_dir: &Path) -> Result<PipelineReport> {
        if self.state != PipelineState::Init {
            return Err(Error::AlreadyRun(self.state));
        }

        let result = self.execute(source_dir).await;
        if let Err(e) = &result {
            log::error!("Pipeline failed in state {}: {}", self.state, e);
            self.transition(PipelineState::Failed);
        }
        result
    }

    async fn execute(&mut self, source_dir: &Path) -> Result<PipelineReport> {
        let toolchain = self.validator.validate(&self.config)?;
        log::debug!("Validated toolchain: {:?}", toolchain);
        self.transition(PipelineState::Validated);

        let run = PipelineRun::prepare(source_dir, toolchain.artifact_extension())?;

        log::info!(
            "Building {} -> {}",
            run.source_dir().display(),
            run.intermediate_artifact().display()
        );
        BuildStage::new(&toolchain)
            .execute(&self.supervisor, &run)
            .await?;
        self.transition(PipelineState::Built);

        log::info!(
            "Signing {} -> {}",
            run.intermediate_artifact().display(),
            run.final_artifact().display()
        );
        SignStage::new(&toolchain)
            .execute(&self.supervisor, &run)
            .await?;

        // An artifact that cannot be hashed is not reported as signed
        let (checksum, size) = match checksum_file(run.final_artifact()).await {
            Ok(digest) => digest,
            Err(e) => {
                discard_artifact(run.final_artifact()).await;
                return Err(e);
            }
        };
        self.transition(PipelineState::Signed);

        let report = PipelineReport {
            source_dir: run.source_dir().to_path_buf(),
            intermediate_artifact: run.intermediate_artifact().to_path_buf(),
            signed_artifact: run.final_artifact().to_path_buf(),
            size,
            checksum,
            finished_at: chrono::Utc::now(),
        };
        self.transition(PipelineState::Done);

        Ok(report)
    }

    fn transition(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal pipeline transition {} -> {}",
            self.state,
            next
        );
        log::debug!("Pipeline state: {} -> {}", self.state, next);
        self.state = next;
    }
}

async fn discard_artifact(path: &Path) {
    match remove_file_if_exists(path).await {
        Ok(true) => log::warn!("Removed unverifiable {}", path.display()),
        Ok(false) => {}
        Err(e) => log::warn!("Failed to remove {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::config::ToolchainConfigBuilder;
    use crate::signer::error::{ConfigError, InputError};

    fn config(root: &Path) -> ToolchainConfig {
        let bin = root.join("jdk").join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("java"), "").unwrap();
        std::fs::write(bin.join("jarsigner"), "").unwrap();
        std::fs::write(root.join("apktool.jar"), "").unwrap();

        ToolchainConfigBuilder::new()
            .runtime_home(root.join("jdk"))
            .builder_path(root.join("apktool.jar"))
            .keystore_path(root.join("missing.jks"))
            .keystore_alias("release")
            .keystore_password("secret")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn config_failure_stops_before_input_check() {
        let root = tempfile::tempdir().unwrap();
        let mut pipeline = Pipeline::with_validator(config(root.path()), ConfigValidator::new());

        let err = pipeline.run(&root.path().join("no-such-dir")).await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingKeystore { .. })));
        assert_eq!(pipeline.state(), PipelineState::Failed);
    }

    #[tokio::test]
    async fn file_input_fails_after_validation() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("missing.jks"), "").unwrap();
        let source = root.path().join("app.apk");
        std::fs::write(&source, "").unwrap();
        let mut pipeline = Pipeline::with_validator(config(root.path()), ConfigValidator::new());

        let err = pipeline.run(&source).await.unwrap_err();
        assert!(matches!(err, Error::Input(InputError::NotADirectory(_))));
        assert_eq!(pipeline.state(), PipelineState::Failed);
        assert!(!root.path().join("app.apk-unsigned.apk").exists());
    }

    #[tokio::test]
    async fn second_run_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let mut pipeline = Pipeline::with_validator(config(root.path()), ConfigValidator::new());
        let _ = pipeline.run(root.path()).await;

        let err = pipeline.run(root.path()).await.unwrap_err();
        assert!(matches!(err, Error::AlreadyRun(PipelineState::Failed)));
    }
}
