//! Per-invocation source and artifact paths.

use crate::signer::error::{ErrorExt, InputError, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Suffix appended to the source directory name for the build output.
pub const UNSIGNED_SUFFIX: &str = "-unsigned";

/// Suffix replacing [`UNSIGNED_SUFFIX`] for the signed output.
pub const SIGNED_SUFFIX: &str = "-signed";

/// Paths owned by one pipeline invocation.
///
/// For a source directory `/work/app` and extension `apk`:
///
/// - intermediate: `/work/app-unsigned.apk`
/// - final: `/work/app-signed.apk`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    source_dir: PathBuf,
    intermediate_artifact: PathBuf,
    final_artifact: PathBuf,
}

impl PipelineRun {
    /// Checks that `source_dir` is an existing directory and derives the
    /// artifact paths next to it.
    ///
    /// # Errors
    ///
    /// - [`InputError::NotFound`] if the path does not exist
    /// - [`InputError::NotADirectory`] if it is not a directory
    /// - [`InputError::NoFileName`] if it has no UTF-8 final component
    pub fn prepare(source_dir: &Path, extension: &str) -> Result<Self> {
        let metadata = match std::fs::metadata(source_dir) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(InputError::NotFound(source_dir.to_path_buf()).into());
            }
            Err(e) => return Err(e).fs_context("inspecting input path", source_dir),
        };
        if !metadata.is_dir() {
            return Err(InputError::NotADirectory(source_dir.to_path_buf()).into());
        }

        let source_dir = source_dir
            .absolutize()
            .fs_context("resolving input path", source_dir)?
            .into_owned();
        let extension = extension.trim_start_matches('.');

        let intermediate_artifact = intermediate_path_for(&source_dir, extension)
            .ok_or_else(|| InputError::NoFileName(source_dir.clone()))?;
        let final_artifact = signed_path_for(&intermediate_artifact, extension)
            .ok_or_else(|| InputError::NoFileName(source_dir.clone()))?;

        Ok(Self {
            source_dir,
            intermediate_artifact,
            final_artifact,
        })
    }

    /// Absolute source directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Unsigned build output.
    pub fn intermediate_artifact(&self) -> &Path {
        &self.intermediate_artifact
    }

    /// Signed output.
    pub fn final_artifact(&self) -> &Path {
        &self.final_artifact
    }
}

/// Derives `<dir>-unsigned.<ext>` as a sibling of `source_dir`.
pub fn intermediate_path_for(source_dir: &Path, extension: &str) -> Option<PathBuf> {
    let base = source_dir.file_name()?.to_str()?;
    Some(source_dir.with_file_name(artifact_file_name(base, UNSIGNED_SUFFIX, extension)))
}

/// Derives the signed path from an intermediate path by replacing
/// [`UNSIGNED_SUFFIX`] with [`SIGNED_SUFFIX`].
pub fn signed_path_for(intermediate: &Path, extension: &str) -> Option<PathBuf> {
    let name = intermediate.file_name()?.to_str()?;
    let base = name.strip_suffix(&artifact_file_name("", UNSIGNED_SUFFIX, extension))?;
    Some(intermediate.with_file_name(artifact_file_name(base, SIGNED_SUFFIX, extension)))
}

fn artifact_file_name(base: &str, suffix: &str, extension: &str) -> String {
    if extension.is_empty() {
        format!("{}{}", base, suffix)
    } else {
        format!("{}{}.{}", base, suffix, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::error::Error;

    #[test]
    fn derives_sibling_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("app");
        std::fs::create_dir(&source).unwrap();

        let run = PipelineRun::prepare(&source, "apk").unwrap();
        assert_eq!(run.intermediate_artifact(), root.path().join("app-unsigned.apk"));
        assert_eq!(run.final_artifact(), root.path().join("app-signed.apk"));
    }

    #[test]
    fn trailing_separator_and_leading_dot_are_ignored() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("game.v2");
        std::fs::create_dir(&source).unwrap();
        let with_slash = PathBuf::from(format!("{}/", source.display()));

        let run = PipelineRun::prepare(&with_slash, ".apk").unwrap();
        assert_eq!(run.source_dir(), source);
        assert_eq!(run.final_artifact(), root.path().join("game.v2-signed.apk"));
    }

    #[test]
    fn signed_path_follows_intermediate() {
        assert_eq!(
            signed_path_for(Path::new("/out/my app-unsigned.apk"), "apk"),
            Some(PathBuf::from("/out/my app-signed.apk"))
        );
        assert_eq!(
            signed_path_for(Path::new("/out/app-unsigned"), ""),
            Some(PathBuf::from("/out/app-signed"))
        );
        assert_eq!(signed_path_for(Path::new("/out/app.apk"), "apk"), None);
    }

    #[test]
    fn file_input_is_not_a_directory() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("app.apk");
        std::fs::write(&file, b"").unwrap();

        assert!(matches!(
            PipelineRun::prepare(&file, "apk"),
            Err(Error::Input(InputError::NotADirectory(_)))
        ));
    }

    #[test]
    fn missing_input_is_not_found() {
        let root = tempfile::tempdir().unwrap();

        assert!(matches!(
            PipelineRun::prepare(&root.path().join("missing"), "apk"),
            Err(Error::Input(InputError::NotFound(_)))
        ));
    }

    #[test]
    fn root_has_no_file_name() {
        assert!(intermediate_path_for(Path::new("/"), "apk").is_none());
    }
}
