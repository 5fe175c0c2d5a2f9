//! Package identifiers.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A manifest package identifier (e.g. `Microsoft.VisualStudio.Workload.VCTools`).
///
/// Identifiers compare, hash and order case-insensitively, but keep the
/// spelling they were declared with so logs read like the manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as declared.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a plain string.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }

    fn folded(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl PartialEq for PackageId {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Eq for PackageId {}

impl PartialEq<str> for PackageId {
    fn eq(&self, other: &str) -> bool {
        self.matches(other)
    }
}

impl PartialEq<&str> for PackageId {
    fn eq(&self, other: &&str) -> bool {
        self.matches(other)
    }
}

impl Hash for PackageId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.folded() {
            state.write_u8(b);
        }
        state.write_u8(0xff);
    }
}

impl Ord for PackageId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl PartialOrd for PackageId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PackageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};

    #[test]
    fn equality_ignores_case() {
        let a = PackageId::new("Microsoft.VisualCpp.Redist.14");
        let b = PackageId::new("microsoft.visualcpp.redist.14");
        assert_eq!(a, b);
        assert_eq!(a, "MICROSOFT.VISUALCPP.REDIST.14");
    }

    #[test]
    fn hash_and_order_agree_with_equality() {
        let mut set = HashSet::new();
        set.insert(PackageId::new("Foo.Bar"));
        assert!(!set.insert(PackageId::new("foo.BAR")));

        let mut map = BTreeMap::new();
        map.insert(PackageId::new("B"), 1);
        map.insert(PackageId::new("a"), 2);
        map.insert(PackageId::new("b"), 3);
        let keys: Vec<_> = map.keys().map(PackageId::as_str).collect();
        assert_eq!(keys, vec!["a", "B"]);
    }

    #[test]
    fn display_keeps_declared_spelling() {
        let id = PackageId::new("Microsoft.VisualStudio.Component.WinXP");
        assert_eq!(id.to_string(), "Microsoft.VisualStudio.Component.WinXP");
    }
}
