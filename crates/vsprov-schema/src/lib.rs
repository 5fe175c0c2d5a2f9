//! Data model for channel and manifest documents.
//!
//! A *channel* is a small, stable document that points at the current
//! *manifest*; the manifest is the full catalog of installable packages.
//! Both are decoded from JSON with serde and are immutable once fetched.

pub mod channel;
pub mod dependency;
pub mod hash;
pub mod id;
pub mod manifest;

// Re-exports
pub use channel::{Channel, ChannelItem};
pub use dependency::DependencyConstraint;
pub use hash::{Sha256Digest, Sha256Hash};
pub use id::PackageId;
pub use manifest::{InstallParams, Manifest, ManifestPackage, PackageType, Payload};

/// Architecture and language tag value that matches every target.
pub const NEUTRAL: &str = "neutral";

/// Behavior flag that allows an unresolvable dependency to be skipped.
pub const IGNORE_APPLICABILITY_FAILURES: &str = "IgnoreApplicabilityFailures";
