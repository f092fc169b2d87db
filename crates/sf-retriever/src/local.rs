//! Components known from local source.

use std::collections::{HashMap, HashSet};

/// The component set an on-disk source scan reports, keyed by metadata type.
///
/// With `source_only` set, retrievers answer from this set alone and never
/// fall back to the org.
#[derive(Debug, Clone, Default)]
pub struct LocalComponents {
    components: HashMap<String, HashSet<String>>,
    source_only: bool,
}

impl LocalComponents {
    pub fn new(source_only: bool) -> Self {
        Self {
            components: HashMap::new(),
            source_only,
        }
    }

    pub fn source_only(&self) -> bool {
        self.source_only
    }

    pub fn insert(&mut self, metadata_type: impl Into<String>, full_name: impl Into<String>) {
        self.components
            .entry(metadata_type.into())
            .or_default()
            .insert(full_name.into());
    }

    pub fn extend<I, S>(&mut self, metadata_type: &str, full_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.components.entry(metadata_type.to_string()).or_default();
        entry.extend(full_names.into_iter().map(Into::into));
    }

    pub fn contains(&self, metadata_type: &str, full_name: &str) -> bool {
        self.components
            .get(metadata_type)
            .is_some_and(|names| names.contains(full_name))
    }

    pub fn len(&self, metadata_type: &str) -> usize {
        self.components.get(metadata_type).map_or(0, HashSet::len)
    }
}
