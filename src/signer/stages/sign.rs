//! Sign stage: jarsigner with a keystore.

use super::ensure_produced;
use crate::signer::error::{Error, ErrorExt, Result};
use crate::signer::pipeline::PipelineRun;
use crate::signer::process::{ProcessSupervisor, ToolInvocation};
use crate::signer::toolchain::ValidatedToolchain;
use crate::signer::utils::fs::remove_file_if_exists;

/// Signs the intermediate artifact into the final artifact.
///
/// Runs `<jarsigner> -verbose -keystore <keystore> -storepass <password>
/// -signedjar <final> <intermediate> <alias>`. The password is masked in logs.
///
/// A stale final artifact is removed before signing and whatever the signer
/// left behind is removed on failure, so a failed stage never leaves a signed
/// artifact on disk.
#[derive(Debug)]
pub struct SignStage<'a> {
    toolchain: &'a ValidatedToolchain,
}

impl<'a> SignStage<'a> {
    /// Creates a sign stage for a validated toolchain.
    pub fn new(toolchain: &'a ValidatedToolchain) -> Self {
        Self { toolchain }
    }

    /// Returns the command this stage runs for `run`.
    pub fn invocation(&self, run: &PipelineRun) -> ToolInvocation {
        ToolInvocation::new(self.toolchain.signer())
            .arg("-verbose")
            .arg("-keystore")
            .arg(self.toolchain.keystore())
            .arg("-storepass")
            .secret_arg(self.toolchain.password())
            .arg("-signedjar")
            .arg(run.final_artifact())
            .arg(run.intermediate_artifact())
            .arg(self.toolchain.alias())
    }

    /// Runs the signer and checks that the final artifact exists.
    ///
    /// # Errors
    ///
    /// [`Error::Sign`] wrapping the execution failure, or [`Error::Fs`] if a
    /// stale artifact cannot be removed.
    pub async fn execute(&self, supervisor: &ProcessSupervisor, run: &PipelineRun) -> Result<()> {
        let final_artifact = run.final_artifact();
        if remove_file_if_exists(final_artifact)
            .await
            .fs_context("removing stale signed artifact", final_artifact)?
        {
            log::debug!("Removed stale {}", final_artifact.display());
        }

        let invocation = self.invocation(run);
        let result = match supervisor.run(&invocation).await.into_result() {
            Ok(()) => ensure_produced(&invocation, final_artifact).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            match remove_file_if_exists(final_artifact).await {
                Ok(true) => log::warn!("Removed partial {}", final_artifact.display()),
                Ok(false) => {}
                Err(cleanup) => log::warn!(
                    "Failed to remove partial {}: {}",
                    final_artifact.display(),
                    cleanup
                ),
            }
            return Err(Error::Sign(e));
        }

        Ok(())
    }
}
