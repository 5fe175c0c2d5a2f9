//! Payload download with streaming SHA256 verification.
//!
//! The body is written to disk and hashed in the same pass; nothing is
//! buffered in memory beyond one chunk.

use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use vsprov_schema::Payload;

use crate::error::InstallError;
use crate::transport::Transport;

/// Map a manifest file name (which may use `\` separators) to a path
/// under `dir`, refusing anything that would escape it.
pub fn payload_path(dir: &Path, file_name: &str) -> Result<PathBuf, InstallError> {
    let normalized = file_name.replace('\\', "/");
    let relative = Path::new(&normalized);

    let mut out = dir.to_path_buf();
    let mut depth = 0usize;
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            _ => {
                return Err(InstallError::config(format!(
                    "Payload file name escapes the download directory: {file_name}"
                )));
            }
        }
    }

    if depth == 0 {
        return Err(InstallError::config(format!(
            "Payload has an empty file name: '{file_name}'"
        )));
    }
    Ok(out)
}

/// Download `payload` into `dir` and verify it.
///
/// Returns the path of the verified file. On any integrity failure the
/// partial file is removed before the error is returned.
pub async fn fetch_payload(
    transport: &dyn Transport,
    dir: &Path,
    payload: &Payload,
    enforce_size: bool,
) -> Result<PathBuf, InstallError> {
    tracing::info!(
        "Downloading file {} from URL: {}",
        payload.file_name,
        payload.url
    );

    let expected = payload
        .sha256
        .to_digest()
        .map_err(|e| InstallError::MalformedDigest {
            file: payload.file_name.clone(),
            reason: e.to_string(),
        })?;

    let dest = payload_path(dir, &payload.file_name)?;
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(InstallError::at(parent))?;
    }

    let mut stream = transport.stream(&payload.url).await?;
    let mut file = File::create(&dest).await.map_err(InstallError::at(&dest))?;
    let mut hasher = Sha256::new();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                drop(file);
                tokio::fs::remove_file(&dest).await.ok();
                return Err(e);
            }
        };
        file.write_all(&chunk)
            .await
            .map_err(InstallError::at(&dest))?;
        hasher.update(&chunk);
        downloaded += chunk.len() as u64;
    }

    file.flush().await.map_err(InstallError::at(&dest))?;
    drop(file);

    let actual = hex::encode(hasher.finalize());
    if !expected.matches(&actual) {
        tokio::fs::remove_file(&dest).await.ok();
        return Err(InstallError::HashMismatch {
            file: payload.file_name.clone(),
            expected: expected.to_string(),
            actual,
        });
    }

    if enforce_size {
        if let Some(declared) = payload.size.filter(|s| *s > 0) {
            if declared != downloaded {
                tokio::fs::remove_file(&dest).await.ok();
                return Err(InstallError::SizeMismatch {
                    file: payload.file_name.clone(),
                    expected: declared,
                    actual: downloaded,
                });
            }
        }
    }

    tracing::debug!("Verified {} ({downloaded} bytes)", payload.file_name);
    Ok(dest)
}

/// Verify an in-memory document against a declared payload entry.
pub fn verify_bytes(
    bytes: &[u8],
    payload: &Payload,
    enforce_size: bool,
) -> Result<(), InstallError> {
    let expected = payload
        .sha256
        .to_digest()
        .map_err(|e| InstallError::MalformedDigest {
            file: payload.file_name.clone(),
            reason: e.to_string(),
        })?;

    let actual = hex::encode(Sha256::digest(bytes));
    if !expected.matches(&actual) {
        return Err(InstallError::HashMismatch {
            file: payload.file_name.clone(),
            expected: expected.to_string(),
            actual,
        });
    }

    if enforce_size {
        if let Some(declared) = payload.size.filter(|s| *s > 0) {
            if declared != bytes.len() as u64 {
                return Err(InstallError::SizeMismatch {
                    file: payload.file_name.clone(),
                    expected: declared,
                    actual: bytes.len() as u64,
                });
            }
        }
    }
    Ok(())
}

/// SHA256 of a local file as lowercase hex, read in 64 KiB blocks.
pub async fn hash_file(path: &Path) -> Result<String, InstallError> {
    let mut file = File::open(path).await.map_err(InstallError::at(path))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let read = file
            .read(&mut buffer)
            .await
            .map_err(InstallError::at(path))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
