//! Build stage: apktool archive build.

use super::ensure_produced;
use crate::signer::error::{Error, ErrorExt, Result};
use crate::signer::pipeline::PipelineRun;
use crate::signer::process::{ProcessSupervisor, ToolInvocation};
use crate::signer::toolchain::ValidatedToolchain;
use crate::signer::utils::fs::remove_file_if_exists;

/// apktool sub-command that builds an archive from a decoded directory.
const BUILD_SUBCOMMAND: &str = "b";

/// Builds the unsigned artifact from the source directory.
///
/// Runs `<java> -jar <builder> b <source_dir> -o <intermediate>`. A stale
/// intermediate artifact is removed first so only this run's output can pass
/// the artifact check.
#[derive(Debug)]
pub struct BuildStage<'a> {
    toolchain: &'a ValidatedToolchain,
}

impl<'a> BuildStage<'a> {
    /// Creates a build stage for a validated toolchain.
    pub fn new(toolchain: &'a ValidatedToolchain) -> Self {
        Self { toolchain }
    }

    /// Returns the command this stage runs for `run`.
    pub fn invocation(&self, run: &PipelineRun) -> ToolInvocation {
        ToolInvocation::new(self.toolchain.launcher())
            .arg("-jar")
            .arg(self.toolchain.builder())
            .arg(BUILD_SUBCOMMAND)
            .arg(run.source_dir())
            .arg("-o")
            .arg(run.intermediate_artifact())
    }

    /// Runs the build and checks that the intermediate artifact exists.
    ///
    /// # Errors
    ///
    /// [`Error::Build`] wrapping the execution failure, or [`Error::Fs`] if a
    /// stale artifact cannot be removed.
    pub async fn execute(&self, supervisor: &ProcessSupervisor, run: &PipelineRun) -> Result<()> {
        let intermediate = run.intermediate_artifact();
        if remove_file_if_exists(intermediate)
            .await
            .fs_context("removing stale unsigned artifact", intermediate)?
        {
            log::debug!("Removed stale {}", intermediate.display());
        }

        let invocation = self.invocation(run);
        supervisor
            .run(&invocation)
            .await
            .into_result()
            .map_err(Error::Build)?;

        ensure_produced(&invocation, intermediate)
            .await
            .map_err(Error::Build)
    }
}
