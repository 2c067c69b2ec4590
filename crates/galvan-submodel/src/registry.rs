//! The ordered submodel registry.

use indexmap::IndexMap;

use crate::submodel::Submodel;

/// Ordered map from registry key (`"particle"`, `"thermal"`, ...) to the
/// submodel filling that role.
///
/// Insertion order is the order submodels are asked for their
/// contributions. Replacing an existing key keeps its position.
#[derive(Default)]
pub struct SubmodelRegistry {
    entries: IndexMap<String, Box<dyn Submodel>>,
}

impl SubmodelRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `submodel` under `key`, returning the submodel it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        submodel: Box<dyn Submodel>,
    ) -> Option<Box<dyn Submodel>> {
        self.entries.insert(key.into(), submodel)
    }

    /// The submodel registered under `key`.
    pub fn get(&self, key: &str) -> Option<&dyn Submodel> {
        self.entries.get(key).map(|s| s.as_ref())
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of registered submodels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registry keys in build order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(key, submodel)` pairs in build order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Submodel)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s.as_ref()))
    }
}

impl std::fmt::Debug for SubmodelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, s)| (k, s.name())))
            .finish()
    }
}
