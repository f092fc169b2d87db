//! Generic per-owner memo.

use std::collections::BTreeMap;

/// Anything a retriever caches: identified by its fully-qualified name.
pub trait Component {
    fn full_name(&self) -> &str;
}

/// Components memoized per owning object.
///
/// Entries are written once per owner and never invalidated; a run's view of
/// the org is frozen at first read. `crawled` records that a full crawl has
/// completed, independently of which owners were filled by targeted lookups.
#[derive(Debug, Clone)]
pub struct RetrieverCache<T> {
    entries: BTreeMap<String, Vec<T>>,
    crawled: bool,
}

impl<T> Default for RetrieverCache<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            crawled: false,
        }
    }
}

impl<T: Component + Clone> RetrieverCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, owner: &str) -> Option<&[T]> {
        self.entries.get(owner).map(Vec::as_slice)
    }

    pub fn contains_owner(&self, owner: &str) -> bool {
        self.entries.contains_key(owner)
    }

    /// Store an owner's components. An owner already present keeps its
    /// first entry.
    pub fn insert(&mut self, owner: impl Into<String>, items: Vec<T>) {
        self.entries.entry(owner.into()).or_insert(items);
    }

    /// Look up one component of an owner by full name.
    pub fn find(&self, owner: &str, full_name: &str) -> Option<&T> {
        self.get(owner)?
            .iter()
            .find(|item| item.full_name() == full_name)
    }

    /// Every cached component, owners in name order.
    pub fn all(&self) -> Vec<T> {
        self.entries.values().flatten().cloned().collect()
    }

    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn mark_crawled(&mut self) {
        self.crawled = true;
    }

    pub fn is_crawled(&self) -> bool {
        self.crawled
    }
}
