//! Signed artifact report and checksum.

use crate::signer::error::{ErrorExt, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Summary of a successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Packaged source directory
    pub source_dir: PathBuf,
    /// Unsigned build output
    pub intermediate_artifact: PathBuf,
    /// Signed output
    pub signed_artifact: PathBuf,
    /// Size of the signed artifact in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the signed artifact
    pub checksum: String,
    /// When signing completed
    pub finished_at: DateTime<Utc>,
}

/// Calculates the SHA-256 checksum and size of a file.
///
/// Reads the file in 8KB chunks.
pub async fn checksum_file(path: &Path) -> Result<(String, u64)> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening artifact for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];
    let mut size = 0u64;

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading artifact for hash calculation", path)?;
        if n == 0 {
            break;
        }
        size += n as u64;
        hasher.update(&buffer[..n]);
    }

    Ok((format!("{:x}", hasher.finalize()), size))
}
