//! Dependency edge constraints.
//!
//! A manifest encodes each dependency either as a bare version string
//! (`"Foo": "15.0"`) or as an object (`"Foo": {"version": "15.0", "chip": "x86"}`).
//! Both decode into the same [`DependencyConstraint`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::IGNORE_APPLICABILITY_FAILURES;

/// Constraint attached to one edge of the dependency graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyConstraint {
    /// Declared version (informational; first match wins during selection).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Optional dependency type (`Optional`, `Recommended`); a set type means
    /// the edge is never followed automatically.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Architecture override for the dependency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chip: Option<String>,
    /// Consumer identifiers for which this edge applies; empty means always.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub when: Vec<String>,
    /// Behavior flags (e.g. `IgnoreApplicabilityFailures`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behaviors: Option<String>,
}

impl DependencyConstraint {
    /// A constraint that only carries a version.
    pub fn version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::default()
        }
    }

    /// Whether the edge is typed (optional/recommended) and must not be followed.
    pub fn is_typed(&self) -> bool {
        self.kind.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// The architecture override, if one is set and non-empty.
    pub fn chip(&self) -> Option<&str> {
        self.chip.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether the edge applies when installing on behalf of `consumer`.
    pub fn applies_to(&self, consumer: &str) -> bool {
        self.when.is_empty() || self.when.iter().any(|w| w.eq_ignore_ascii_case(consumer))
    }

    /// Whether an unresolvable target may be skipped silently.
    pub fn ignores_applicability_failures(&self) -> bool {
        self.behaviors.as_deref().is_some_and(|b| {
            b.split(',')
                .any(|flag| flag.trim().eq_ignore_ascii_case(IGNORE_APPLICABILITY_FAILURES))
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Detailed {
    #[serde(default)]
    version: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    chip: Option<String>,
    #[serde(default)]
    when: Vec<String>,
    #[serde(default)]
    behaviors: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Encoded {
    Version(String),
    Detailed(Detailed),
}

impl<'de> Deserialize<'de> for DependencyConstraint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Encoded::deserialize(deserializer)? {
            Encoded::Version(v) => Self::version(v),
            Encoded::Detailed(d) => Self {
                version: d.version,
                kind: d.kind,
                chip: d.chip,
                when: d.when,
                behaviors: d.behaviors,
            },
        })
    }
}
