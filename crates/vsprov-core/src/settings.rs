//! Run configuration.
//!
//! Every field has a default matching the Visual Studio 2017 Build Tools
//! channel, so an empty config file (or none at all) provisions the C++
//! toolchain. The CLI layers a TOML file and flag/env overrides on top.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Channel that points at the current release manifest.
pub const DEFAULT_CHANNEL_URL: &str = "https://aka.ms/vs/15/release/channel";

/// Channel item that carries the package manifest.
pub const DEFAULT_MANIFEST_ID: &str = "Microsoft.VisualStudio.Manifests.VisualStudio";

/// Product whose `when` lists decide which conditional edges are followed.
pub const DEFAULT_PRODUCT_ID: &str = "Microsoft.VisualStudio.Product.BuildTools";

/// Root packages installed by default, in order.
pub const DEFAULT_PACKAGES: &[&str] = &[
    "Microsoft.VisualStudio.Product.BuildTools",
    "Microsoft.VisualStudio.Workload.VCTools",
    "Microsoft.VisualStudio.Component.VC.140",
    "Microsoft.VisualStudio.Component.WinXP",
];

/// Runtime redistributables assumed to be present on the target already.
pub const DEFAULT_PREINSTALLED: &[&str] = &[
    "Microsoft.Net.4.6.1.FullRedist.NonThreshold",
    "Microsoft.Net.4.6.1.FullRedist.Threshold",
    "Microsoft.VisualCpp.Redist.14",
    "Microsoft.VisualCpp.Redist.14.Latest",
];

/// How much the downloaded manifest is trusted before decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestTrust {
    /// The manifest must hash to the digest (and size) the channel declares.
    #[default]
    ChannelDigest,
    /// Accept the manifest as served. Logged as a warning.
    Unverified,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub channel_url: String,
    pub manifest_id: String,
    pub product_id: String,
    pub packages: Vec<String>,
    pub preinstalled: Vec<String>,
    /// Default architecture for packages reached without a chip override.
    pub arch: String,
    pub locale: String,
    /// Where extension archives are unpacked.
    pub install_root: PathBuf,
    /// Parent directory for per-package scratch directories.
    pub scratch_dir: Option<PathBuf>,
    pub manifest_trust: ManifestTrust,
    pub enforce_payload_size: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channel_url: DEFAULT_CHANNEL_URL.to_string(),
            manifest_id: DEFAULT_MANIFEST_ID.to_string(),
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            packages: DEFAULT_PACKAGES.iter().map(ToString::to_string).collect(),
            preinstalled: DEFAULT_PREINSTALLED
                .iter()
                .map(ToString::to_string)
                .collect(),
            arch: "x64".to_string(),
            locale: "en-us".to_string(),
            install_root: PathBuf::from(r"C:\BuildTools"),
            scratch_dir: None,
            manifest_trust: ManifestTrust::default(),
            enforce_payload_size: true,
        }
    }
}
