//! Settings loading: defaults, then the TOML file, then overrides.

use anyhow::{Context, Result};
use std::path::Path;

use vsprov_core::{ManifestTrust, Settings};

use crate::Overrides;

/// Read settings from `path`, or use the defaults when no file is given.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

impl Overrides {
    pub fn apply(self, settings: &mut Settings) {
        if let Some(url) = self.channel_url {
            settings.channel_url = url;
        }
        if let Some(root) = self.install_root {
            settings.install_root = root;
        }
        if let Some(dir) = self.scratch_dir {
            settings.scratch_dir = Some(dir);
        }
        if let Some(arch) = self.arch {
            settings.arch = arch;
        }
        if let Some(locale) = self.locale {
            settings.locale = locale;
        }
        if self.allow_unverified_manifest {
            settings.manifest_trust = ManifestTrust::Unverified;
        }
    }
}

/// Final settings for a run. A non-empty `packages` replaces the root set.
pub fn resolve(
    path: Option<&Path>,
    overrides: Overrides,
    packages: Vec<String>,
) -> Result<Settings> {
    let mut settings = load(path)?;
    overrides.apply(&mut settings);
    if !packages.is_empty() {
        settings.packages = packages;
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn no_file_means_defaults() {
        let settings = load(None).unwrap();
        assert_eq!(settings.arch, "x64");
        assert_eq!(settings.packages.len(), 4);
    }

    #[test]
    fn file_then_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vsprov.toml");
        std::fs::write(
            &path,
            r#"
            channel-url = "https://mirror.example.com/channel"
            locale = "de-de"
            install-root = "D:/BuildTools"
            "#,
        )
        .unwrap();

        let overrides = Overrides {
            install_root: Some(PathBuf::from("E:/Tools")),
            allow_unverified_manifest: true,
            ..Overrides::default()
        };
        let settings = resolve(Some(&path), overrides, vec!["Only.This".to_string()]).unwrap();

        assert_eq!(settings.channel_url, "https://mirror.example.com/channel");
        assert_eq!(settings.locale, "de-de");
        assert_eq!(settings.install_root, PathBuf::from("E:/Tools"));
        assert_eq!(settings.manifest_trust, ManifestTrust::Unverified);
        assert_eq!(settings.packages, vec!["Only.This"]);
    }

    #[test]
    fn empty_package_list_keeps_configured_roots() {
        let settings = resolve(None, Overrides::default(), Vec::new()).unwrap();
        assert_eq!(settings.packages, Settings::default().packages);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "arch = [").unwrap();
        let err = load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
