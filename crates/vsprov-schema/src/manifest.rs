//! Manifest documents: the catalog of installable packages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dependency::DependencyConstraint;
use crate::hash::Sha256Hash;
use crate::id::PackageId;

/// A decoded manifest document (`{"packages": [...]}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Every package definition, in manifest order. Identifiers repeat when a
    /// package ships per-architecture or per-language variants.
    #[serde(default)]
    pub packages: Vec<ManifestPackage>,
}

impl Manifest {
    /// Decode a manifest document from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error if the bytes are not a valid manifest.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// All definitions sharing `id` (case-insensitive), in manifest order.
    pub fn variants<'a, 'b>(&'a self, id: &'b str) -> impl Iterator<Item = &'a ManifestPackage> {
        self.packages.iter().filter(move |p| p.id.matches(id))
    }
}

/// One package definition in a manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestPackage {
    /// Package identifier; not unique across the manifest.
    pub id: PackageId,
    /// Declared version.
    #[serde(default)]
    pub version: String,
    /// Installation mechanism.
    #[serde(default, rename = "type")]
    pub kind: PackageType,
    /// Target architecture; `None` or `neutral` matches any.
    #[serde(default)]
    pub chip: Option<String>,
    /// Language tag; `None` or `neutral` matches any locale.
    #[serde(default)]
    pub language: Option<String>,
    /// Outgoing dependency edges keyed by target identifier.
    #[serde(default)]
    pub dependencies: BTreeMap<PackageId, DependencyConstraint>,
    /// Files to download; the first one is the primary payload.
    #[serde(default)]
    pub payloads: Vec<Payload>,
    /// Command-line template for executable packages.
    #[serde(default)]
    pub install_params: Option<InstallParams>,
    /// Property assignments passed to the installer-database runner.
    #[serde(default)]
    pub msi_properties: BTreeMap<String, String>,
}

impl ManifestPackage {
    /// The payload the dispatcher hands to the installer.
    pub fn primary_payload(&self) -> Option<&Payload> {
        self.payloads.first()
    }

    /// Sum of declared payload sizes.
    pub fn declared_size(&self) -> u64 {
        self.payloads.iter().filter_map(|p| p.size).sum()
    }
}

/// Installation mechanism declared by a package's `type` tag.
///
/// Unknown tags decode to [`PackageType::Other`] so that catalog-only types
/// (`Component`, `Workload`, `Group`, ...) never fail manifest decoding; they
/// only become an error if something tries to install their payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackageType {
    /// Self-extracting executable (`Exe`).
    Exe,
    /// Windows Installer database (`Msi`).
    Msi,
    /// Windows update package (`Msu`).
    Msu,
    /// Extension archive (`Vsix`).
    Vsix,
    /// Any other tag, kept verbatim.
    Other(String),
    /// No tag declared.
    #[default]
    Unspecified,
}

impl PackageType {
    /// The tag as it appears in the manifest.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exe => "Exe",
            Self::Msi => "Msi",
            Self::Msu => "Msu",
            Self::Vsix => "Vsix",
            Self::Other(s) => s,
            Self::Unspecified => "",
        }
    }
}

impl From<String> for PackageType {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "exe" => Self::Exe,
            "msi" => Self::Msi,
            "msu" => Self::Msu,
            "vsix" => Self::Vsix,
            "" => Self::Unspecified,
            _ => Self::Other(s),
        }
    }
}

impl From<PackageType> for String {
    fn from(t: PackageType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install parameters for executable packages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallParams {
    /// File to run; for executables this must be the `[Payload]` sentinel.
    #[serde(default)]
    pub file_name: String,
    /// Argument template with `[Placeholder]` tokens.
    #[serde(default)]
    pub parameters: String,
}

/// A single downloadable file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    /// Relative file name; may contain `\` separated sub-directories.
    pub file_name: String,
    /// Expected SHA-256 of the file contents.
    pub sha256: Sha256Hash,
    /// Declared size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Download location.
    #[serde(default)]
    pub url: String,
}
