use std::collections::HashSet;

use vsprov_schema::PackageId;

/// Package ids already installed, or in the middle of being installed,
/// during one run.
///
/// Ids are recorded before their dependencies are visited, so a cyclic
/// graph terminates and a shared dependency is installed once.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    seen: HashSet<PackageId>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger that treats `ids` as already present on the machine.
    pub fn seeded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PackageId>,
    {
        Self {
            seen: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Record `id`. Returns `false` if it was already present.
    pub fn mark(&mut self, id: impl Into<PackageId>) -> bool {
        self.seen.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(&PackageId::new(id))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
