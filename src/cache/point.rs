use super::{Accessor, Cache, FetchResult};
use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Stores every value passing through, keyed by exact key.
///
/// Two concurrent `get` calls for the same missing key both reach the
/// accessor; whichever resolves last is the value left in the cache.
pub struct PointCache<K, V> {
    accessor: Arc<dyn Accessor<K, V>>,
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> PointCache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(accessor: impl Accessor<K, V> + 'static) -> Self {
        Self::from_shared(Arc::new(accessor))
    }

    pub fn from_shared(accessor: Arc<dyn Accessor<K, V>>) -> Self {
        PointCache {
            accessor,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl<K, V> Cache<K, V> for PointCache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: K) -> FetchResult<V> {
        let cached = self.entries.lock().get(&key).cloned();
        if let Some(value) = cached {
            debug!("Cache hit for {:?}", key);
            return Ok(Some(value));
        }

        debug!("Cache miss for {:?}, fetching", key);
        let fetched = self.accessor.fetch(key.clone()).await?;
        if let Some(value) = &fetched {
            self.entries.lock().insert(key, value.clone());
        }
        Ok(fetched)
    }

    fn reset(&self) {
        self.entries.lock().clear();
    }
}
