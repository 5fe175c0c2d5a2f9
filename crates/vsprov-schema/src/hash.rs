//! SHA-256 digest newtypes.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A SHA-256 hash string exactly as declared in a channel or manifest.
///
/// Manifests are decoded without validating every digest up front, since
/// most packages in a catalog are never fetched. Validation happens when a
/// payload is actually verified, via [`Sha256Hash::to_digest`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Sha256Hash(String);

impl Sha256Hash {
    /// Create a new `Sha256Hash` without validation.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Return the declared string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the declared string into a normalized [`Sha256Digest`].
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not 64 hex characters.
    pub fn to_digest(&self) -> Result<Sha256Digest> {
        Sha256Digest::new(self.0.as_str())
    }
}

impl std::fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Sha256Hash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Sha256Hash {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A validated SHA-256 digest (64 lowercase hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Create a new `Sha256Digest`, validating the input.
    ///
    /// Accepts upper- or lowercase hex, with or without a `sha256:` prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex portion is not exactly 64 ASCII hex characters.
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        let hex = s.strip_prefix("sha256:").unwrap_or(&s);

        if hex.len() != 64 {
            anyhow::bail!(
                "Invalid SHA256 digest: expected 64 hex characters, got {} in '{s}'",
                hex.len(),
            );
        }

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid SHA256 digest: contains non-hex characters in '{s}'");
        }

        Ok(Self(hex.to_lowercase()))
    }

    /// Get the digest as a lowercase hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a computed hex digest, ignoring case.
    pub fn matches(&self, actual_hex: &str) -> bool {
        self.0.eq_ignore_ascii_case(actual_hex)
    }
}

impl std::fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
