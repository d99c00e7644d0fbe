use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;

use crate::errors::ServiceError;

/// Generic in-memory ordered key-value map store.
///
/// Wraps a `BTreeMap<K, V>` behind a `RwLock`: one writer or many readers.
/// Read helpers hand out clones so no guard escapes the store.
#[derive(Clone)]
pub struct MapStore<K, V> {
    inner: Arc<RwLock<BTreeMap<K, V>>>,
}

impl<K, V> Default for MapStore<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self { inner: Arc::new(RwLock::new(BTreeMap::new())) }
    }
}

impl<K, V> MapStore<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    /// Build the store from initial entries. Later duplicates replace earlier ones.
    pub fn from_entries<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        Self { inner: Arc::new(RwLock::new(entries.into_iter().collect())) }
    }

    /// Snapshot all values in key order.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Snapshot the values matching a predicate, in key order.
    pub async fn filter_values<F>(&self, pred: F) -> Vec<V>
    where
        F: Fn(&V) -> bool,
    {
        let map = self.inner.read().await;
        map.values().filter(|v| pred(v)).cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    pub async fn contains_key(&self, key: &K) -> bool {
        let map = self.inner.read().await;
        map.contains_key(key)
    }

    /// Evaluate a predicate against the stored value without cloning it.
    pub async fn check<F>(&self, key: &K, pred: F) -> bool
    where
        F: FnOnce(&V) -> bool,
    {
        let map = self.inner.read().await;
        map.get(key).map(pred).unwrap_or(false)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Apply a mutation under a single write guard.
    /// Check-then-write sequences must go through here to stay atomic.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut BTreeMap<K, V>) -> Result<R, ServiceError>,
    {
        let mut map = self.inner.write().await;
        f(&mut map)
    }
}
