use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use super::types::{CacheEntry, Identity};

static GLOBAL_CACHE: OnceLock<ResourceCache> = OnceLock::new();

/// Registry of loaded resources keyed by identity.
///
/// Clones share the same registry. The lock is only taken for the duration of
/// a single call and never across an `.await`.
#[derive(Clone, Default)]
pub struct ResourceCache {
    entries: Arc<Mutex<HashMap<Identity, CacheEntry>>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache. Created on first use and never torn down.
    pub fn global() -> &'static ResourceCache {
        GLOBAL_CACHE.get_or_init(ResourceCache::new)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Identity, CacheEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Insert or overwrite the entry for `entry.identity`.
    pub fn put(&self, entry: CacheEntry) {
        let identity = entry.identity.clone();
        if self.lock().insert(identity.clone(), entry).is_some() {
            tracing::warn!(
                target: "loadplan.cache",
                identity = %identity,
                "cache entry overwritten by a second load"
            );
        }
    }

    pub fn get(&self, identity: &Identity) -> Option<CacheEntry> {
        self.lock().get(identity).cloned()
    }

    pub fn remove(&self, identity: &Identity) -> Option<CacheEntry> {
        self.lock().remove(identity)
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.lock().contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Cached identities, sorted.
    pub fn identities(&self) -> Vec<Identity> {
        let mut ids: Vec<Identity> = self.lock().keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entries", &self.len())
            .finish()
    }
}
