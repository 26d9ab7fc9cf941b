//! Keyed lookup-or-create cache.
//!
//! # Invariants
//! - At most one instance is created per key for the registry lifetime.
//! - Entries are never evicted.
//! - A poisoned lock is recovered; `get_or_create` only ever inserts.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub struct SingletonRegistry<K, V> {
    entries: Mutex<BTreeMap<K, Arc<V>>>,
}

impl<K: Ord, V> SingletonRegistry<K, V> {
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the instance cached under `key`, creating it with `factory`
    /// on first use.
    ///
    /// `factory` runs while the registry lock is held and must not call back
    /// into the same registry.
    pub fn get_or_create(&self, key: K, factory: impl FnOnce(&K) -> V) -> Arc<V> {
        let mut entries = self.lock();
        if let Some(existing) = entries.get(&key) {
            return Arc::clone(existing);
        }
        let created = Arc::new(factory(&key));
        entries.insert(key, Arc::clone(&created));
        created
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.lock().get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<K, Arc<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Ord, V> Default for SingletonRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
