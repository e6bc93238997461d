//! Executable discovery inside a runtime home.
//!
//! The runtime's `bin` directory is walked recursively and every file is
//! matched by its base name with the extension stripped, so `java`,
//! `java.exe` and `java.cmd` all satisfy a lookup for `java`.

use std::path::{Path, PathBuf};

/// Runtime launcher executable name.
pub const RUNTIME_LAUNCHER: &str = "java";

/// Signing utility executable name.
pub const SIGNER: &str = "jarsigner";

/// Executables located under a runtime's `bin` directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DetectedExecutables {
    /// First file whose stem is [`RUNTIME_LAUNCHER`]
    pub launcher: Option<PathBuf>,
    /// First file whose stem is [`SIGNER`]
    pub signer: Option<PathBuf>,
}

/// Returns the `bin` directory of a runtime home.
pub fn bin_dir(runtime_home: &Path) -> PathBuf {
    runtime_home.join("bin")
}

/// Walks `bin_dir` and records the launcher and signer executables.
///
/// Unreadable entries are skipped. A missing `bin_dir` yields an empty
/// result rather than an error; the caller reports which executable is absent.
pub fn scan_executables(bin_dir: &Path) -> DetectedExecutables {
    let mut entries: Vec<_> = walkdir::WalkDir::new(bin_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .collect();

    // Deterministic pick when several files share a stem (java, java.exe)
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let mut detected = DetectedExecutables::default();
    for entry in entries {
        let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        if stem == RUNTIME_LAUNCHER && detected.launcher.is_none() {
            log::debug!("Found {} at: {}", RUNTIME_LAUNCHER, entry.path().display());
            detected.launcher = Some(entry.into_path());
        } else if stem == SIGNER && detected.signer.is_none() {
            log::debug!("Found {} at: {}", SIGNER, entry.path().display());
            detected.signer = Some(entry.into_path());
        }
    }

    detected
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_executables_in_nested_directories() {
        let home = tempfile::tempdir().unwrap();
        let bin = bin_dir(home.path());
        fs::create_dir_all(bin.join("tools")).unwrap();
        fs::write(bin.join("java"), "").unwrap();
        fs::write(bin.join("tools").join("jarsigner"), "").unwrap();

        let detected = scan_executables(&bin);
        assert_eq!(detected.launcher, Some(bin.join("java")));
        assert_eq!(detected.signer, Some(bin.join("tools").join("jarsigner")));
    }

    #[test]
    fn strips_extensions_before_matching() {
        let home = tempfile::tempdir().unwrap();
        let bin = bin_dir(home.path());
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("java.exe"), "").unwrap();
        fs::write(bin.join("jarsigner.exe"), "").unwrap();
        fs::write(bin.join("javac.exe"), "").unwrap();

        let detected = scan_executables(&bin);
        assert_eq!(detected.launcher, Some(bin.join("java.exe")));
        assert_eq!(detected.signer, Some(bin.join("jarsigner.exe")));
    }

    #[test]
    fn similar_names_do_not_match() {
        let home = tempfile::tempdir().unwrap();
        let bin = bin_dir(home.path());
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("javaw"), "").unwrap();
        fs::write(bin.join("jarsigner-old"), "").unwrap();

        assert_eq!(scan_executables(&bin), DetectedExecutables::default());
    }

    #[test]
    fn missing_bin_directory_detects_nothing() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(
            scan_executables(&bin_dir(home.path())),
            DetectedExecutables::default()
        );
    }
}
