/* src/cert/bundle.rs */

use crate::error::BundleError;
use log::info;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Outcome of a successful bundle write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    pub path: PathBuf,
    pub size: usize,
    pub sha256: String,
}

/// Certificate bytes, one newline, key bytes. The PEM contents are not inspected.
pub fn combine(cert: &[u8], key: &[u8]) -> Vec<u8> {
    let mut combined = Vec::with_capacity(cert.len() + 1 + key.len());
    combined.extend_from_slice(cert);
    // Separator in case the certificate lacks a trailing newline.
    combined.push(b'\n');
    combined.extend_from_slice(key);
    combined
}

pub fn read_pem(path: &Path) -> Result<Vec<u8>, BundleError> {
    fs::read(path).map_err(|source| BundleError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

// Lands the data next to the target first so a failed write never leaves a truncated bundle.
fn write_atomically(path: &Path, data: &[u8]) -> Result<(), BundleError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle".to_string());
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    let result = fs::write(&temp_path, data).and_then(|_| fs::rename(&temp_path, path));
    if let Err(source) = result {
        fs::remove_file(&temp_path).ok();
        return Err(BundleError::FileWrite {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Reads the certificate and key, then writes their concatenation to `bundle_path`.
///
/// Both inputs are read before anything touches the bundle, so a missing
/// file leaves any previous bundle untouched.
pub fn write_bundle(
    cert_path: &Path,
    key_path: &Path,
    bundle_path: &Path,
) -> Result<BundleSummary, BundleError> {
    let cert = read_pem(cert_path)?;
    let key = read_pem(key_path)?;

    let combined = combine(&cert, &key);
    write_atomically(bundle_path, &combined)?;

    let summary = BundleSummary {
        path: bundle_path.to_path_buf(),
        size: combined.len(),
        sha256: hex::encode(Sha256::digest(&combined)),
    };
    info!(
        "+ Bundle written: {} ({} bytes, sha256 {})",
        summary.path.display(),
        summary.size,
        summary.sha256
    );
    Ok(summary)
}
