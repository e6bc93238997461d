//! Build and sign stage adapters.
//!
//! Each stage turns the validated toolchain and the run's paths into one
//! [`ToolInvocation`] and hands it to the
//! [`ProcessSupervisor`](crate::signer::process::ProcessSupervisor). Stage
//! failures are fatal; nothing is retried.

mod build;
mod sign;

pub use build::BuildStage;
pub use sign::SignStage;

use crate::signer::error::ExecutionError;
use crate::signer::process::ToolInvocation;
use crate::signer::utils::fs::is_file;
use std::path::Path;

/// Fails with [`ExecutionError::MissingArtifact`] unless `path` is a file.
async fn ensure_produced(invocation: &ToolInvocation, path: &Path) -> Result<(), ExecutionError> {
    if is_file(path).await {
        Ok(())
    } else {
        Err(ExecutionError::MissingArtifact {
            command: invocation.to_string(),
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::config::ToolchainConfigBuilder;
    use crate::signer::pipeline::PipelineRun;
    use crate::signer::toolchain::{ConfigValidator, ValidatedToolchain};
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn toolchain(root: &TempDir) -> ValidatedToolchain {
        let bin = root.path().join("jdk").join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("java"), "").unwrap();
        std::fs::write(bin.join("jarsigner"), "").unwrap();
        std::fs::write(root.path().join("apktool.jar"), "").unwrap();
        std::fs::write(root.path().join("my keys.jks"), "").unwrap();

        let config = ToolchainConfigBuilder::new()
            .runtime_home(root.path().join("jdk"))
            .builder_path(root.path().join("apktool.jar"))
            .keystore_path(root.path().join("my keys.jks"))
            .keystore_alias("release")
            .keystore_password("p@ss word")
            .build()
            .unwrap();
        ConfigValidator::new().validate(&config).unwrap()
    }

    fn run(root: &TempDir) -> PipelineRun {
        let source = root.path().join("my app");
        std::fs::create_dir_all(&source).unwrap();
        PipelineRun::prepare(&source, "apk").unwrap()
    }

    fn os(path: &Path) -> OsString {
        path.as_os_str().to_os_string()
    }

    #[test]
    fn build_arguments_follow_apktool_contract() {
        let root = tempfile::tempdir().unwrap();
        let toolchain = toolchain(&root);
        let run = run(&root);

        let invocation = BuildStage::new(&toolchain).invocation(&run);
        assert_eq!(invocation.program(), toolchain.launcher());
        assert_eq!(
            invocation.args(),
            &[
                OsString::from("-jar"),
                os(toolchain.builder()),
                OsString::from("b"),
                os(run.source_dir()),
                OsString::from("-o"),
                os(run.intermediate_artifact()),
            ]
        );
    }

    #[test]
    fn sign_arguments_follow_jarsigner_contract() {
        let root = tempfile::tempdir().unwrap();
        let toolchain = toolchain(&root);
        let run = run(&root);

        let invocation = SignStage::new(&toolchain).invocation(&run);
        assert_eq!(invocation.program(), toolchain.signer());
        assert_eq!(
            invocation.args(),
            &[
                OsString::from("-verbose"),
                OsString::from("-keystore"),
                os(toolchain.keystore()),
                OsString::from("-storepass"),
                OsString::from("p@ss word"),
                OsString::from("-signedjar"),
                os(run.final_artifact()),
                os(run.intermediate_artifact()),
                OsString::from("release"),
            ]
        );
        assert!(!invocation.to_string().contains("p@ss word"));
    }
}
