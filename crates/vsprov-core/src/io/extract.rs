//! Extension archive (VSIX) extraction.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use crate::error::InstallError;

/// Top-level folder of a VSIX whose contents map onto the install root.
pub const CONTENTS_PREFIX: &str = "Contents/";

/// Extract every `Contents/` entry of the archive at `archive` into `root`,
/// keeping the rest of each entry's relative path.
///
/// Returns the number of files written.
pub fn extract_vsix(archive: &Path, root: &Path) -> Result<usize, InstallError> {
    tracing::info!("Extracting VSIX file: {}", archive.display());

    let file = File::open(archive).map_err(InstallError::at(archive))?;
    let mut zip = zip::ZipArchive::new(file)?;
    let mut written = 0;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let Some(name) = entry.enclosed_name() else {
            tracing::warn!("Skipping archive entry outside the archive root: {}", entry.name());
            continue;
        };

        let Some(rest) = strip_contents(&name) else {
            continue;
        };
        let dest = root.join(rest);

        if entry.is_dir() {
            std::fs::create_dir_all(&dest).map_err(InstallError::at(&dest))?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(InstallError::at(parent))?;
        }
        let mut out = File::create(&dest).map_err(InstallError::at(&dest))?;
        std::io::copy(&mut entry, &mut out).map_err(InstallError::at(&dest))?;
        written += 1;
    }

    tracing::info!("Extracted {written} files to {}", root.display());
    Ok(written)
}

/// Async wrapper that runs [`extract_vsix`] on the blocking pool.
pub async fn extract_vsix_blocking(archive: PathBuf, root: PathBuf) -> Result<usize, InstallError> {
    tokio::task::spawn_blocking(move || extract_vsix(&archive, &root))
        .await
        .map_err(|e| InstallError::Io(std::io::Error::other(e)))?
}

/// Normalized relative path below `Contents/`, if the entry lives there.
fn strip_contents(name: &Path) -> Option<PathBuf> {
    let parts: Vec<&str> = name
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    let slashed = parts.join("/");
    let rest = slashed.strip_prefix(CONTENTS_PREFIX)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.split('/').collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_vsix(path: &Path) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        zip.start_file("extension.vsixmanifest", options).unwrap();
        zip.write_all(b"<PackageManifest/>").unwrap();

        zip.add_directory("Contents/MSBuild/Empty/", options)
            .unwrap();

        zip.start_file("Contents/MSBuild/v140_xp/Toolset.props", options)
            .unwrap();
        zip.write_all(b"<Project/>").unwrap();

        zip.start_file("Contents/readme.txt", options).unwrap();
        zip.write_all(b"hello").unwrap();

        zip.start_file("Other/ignored.txt", options).unwrap();
        zip.write_all(b"nope").unwrap();

        zip.finish().unwrap();
    }

    #[test]
    fn extracts_only_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("pkg.vsix");
        build_vsix(&archive);
        let root = tmp.path().join("BuildTools");

        let written = extract_vsix(&archive, &root).unwrap();
        assert_eq!(written, 2);

        assert_eq!(
            std::fs::read(root.join("MSBuild").join("v140_xp").join("Toolset.props")).unwrap(),
            b"<Project/>"
        );
        assert_eq!(std::fs::read(root.join("readme.txt")).unwrap(), b"hello");
        assert!(root.join("MSBuild").join("Empty").is_dir());
        assert!(!root.join("extension.vsixmanifest").exists());
        assert!(!root.join("Other").exists());
        assert!(!root.join("ignored.txt").exists());
    }

    #[test]
    fn not_an_archive_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("broken.vsix");
        std::fs::write(&archive, b"not a zip").unwrap();

        let err = extract_vsix(&archive, tmp.path()).unwrap_err();
        assert!(matches!(err, InstallError::Archive(_)));
    }

    #[test]
    fn strip_contents_requires_prefix() {
        assert_eq!(
            strip_contents(Path::new("Contents/a/b.dll")),
            Some(PathBuf::from("a").join("b.dll"))
        );
        assert_eq!(strip_contents(Path::new("Contents")), None);
        assert_eq!(strip_contents(Path::new("contents/a.dll")), None);
        assert_eq!(strip_contents(Path::new("ContentsX/a.dll")), None);
    }

    #[tokio::test]
    async fn blocking_wrapper_extracts() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("pkg.vsix");
        build_vsix(&archive);
        let root = tmp.path().join("out");

        let written = extract_vsix_blocking(archive, root.clone()).await.unwrap();
        assert_eq!(written, 2);
        assert!(root.join("readme.txt").is_file());
    }
}
