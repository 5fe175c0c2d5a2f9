//! Hash command

use anyhow::{Context, Result};
use std::path::PathBuf;

use vsprov_core::io::download::hash_file;

/// Print `<sha256> <path>` for each file, in the form manifests declare it.
pub async fn hash(files: &[PathBuf]) -> Result<()> {
    for file in files {
        let digest = hash_file(file)
            .await
            .with_context(|| format!("Failed to hash {}", file.display()))?;
        println!("{digest} {}", file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        std::fs::write(&a, b"hello").unwrap();
        std::fs::write(&b, b"").unwrap();

        hash(&[a, b]).await.unwrap();
    }

    #[tokio::test]
    async fn stops_at_first_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = hash(&[dir.path().join("no-such-file.bin")]).await.unwrap_err();
        assert!(err.to_string().contains("Failed to hash"));
        assert!(format!("{err:#}").contains("no-such-file.bin"));
    }
}
