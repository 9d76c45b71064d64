use super::{Accessor, Cache, FetchResult};
use async_trait::async_trait;
use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Window configuration for [`WindowedCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    /// Number of keys right below the requested one to prefetch.
    pub previous_items: u32,
    /// Number of keys right above the requested one to prefetch.
    pub following_items: u32,
    /// When false, only the requested key is fetched.
    pub preload: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        CacheOptions {
            previous_items: 1,
            following_items: 1,
            preload: true,
        }
    }
}

/// Cache for consecutively stored data (e.g. paginated content).
///
/// Besides the requested key, every `get` prefetches the neighbouring keys
/// in the background so sequential reads are served from memory. Background
/// fetches that return no data store nothing, and their failures are logged
/// and dropped.
pub struct WindowedCache<V> {
    accessor: Arc<dyn Accessor<i64, V>>,
    entries: Arc<Mutex<HashMap<i64, V>>>,
    options: CacheOptions,
    prefetches: Mutex<Vec<JoinHandle<()>>>,
}

impl<V> WindowedCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(accessor: impl Accessor<i64, V> + 'static, options: CacheOptions) -> Self {
        Self::from_shared(Arc::new(accessor), options)
    }

    pub fn from_shared(accessor: Arc<dyn Accessor<i64, V>>, options: CacheOptions) -> Self {
        WindowedCache {
            accessor,
            entries: Arc::new(Mutex::new(HashMap::new())),
            options,
            prefetches: Mutex::new(Vec::new()),
        }
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    pub fn contains(&self, key: i64) -> bool {
        self.entries.lock().contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Keys around `key` that are not cached yet, lowest offset first.
    /// Neighbours past either end of the `i64` range are left out.
    fn missing_neighbours(&self, key: i64) -> Vec<i64> {
        let before =
            (1..=self.options.previous_items as i64).filter_map(|i| key.checked_sub(i));
        let after =
            (1..=self.options.following_items as i64).filter_map(|i| key.checked_add(i));
        let entries = self.entries.lock();
        before
            .chain(after)
            .filter(|k| !entries.contains_key(k))
            .collect()
    }

    fn prefetch_around(&self, key: i64) {
        let neighbours = self.missing_neighbours(key);
        if neighbours.is_empty() {
            return;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No Tokio runtime available, skipping prefetch around {}", key);
                return;
            }
        };

        let mut prefetches = self.prefetches.lock();
        prefetches.retain(|task| !task.is_finished());
        for neighbour in neighbours {
            debug!("Prefetching {} around {}", neighbour, key);
            let accessor = Arc::clone(&self.accessor);
            let entries = Arc::clone(&self.entries);
            prefetches.push(handle.spawn(async move {
                match accessor.fetch(neighbour).await {
                    Ok(Some(value)) => {
                        entries.lock().insert(neighbour, value);
                    }
                    Ok(None) => debug!("Nothing to prefetch at {}", neighbour),
                    Err(err) => warn!("Prefetch of {} failed: {}", neighbour, err),
                }
            }));
        }
    }
}

#[async_trait]
impl<V> Cache<i64, V> for WindowedCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: i64) -> FetchResult<V> {
        if self.options.preload {
            self.prefetch_around(key);
        }

        let cached = self.entries.lock().get(&key).cloned();
        if let Some(value) = cached {
            debug!("Cache hit for {}", key);
            return Ok(Some(value));
        }

        debug!("Cache miss for {}, fetching", key);
        let fetched = self.accessor.fetch(key).await?;
        if let Some(value) = &fetched {
            self.entries.lock().insert(key, value.clone());
        }
        Ok(fetched)
    }

    fn reset(&self) {
        self.entries.lock().clear();
    }

    async fn settle(&self) {
        let pending = std::mem::take(&mut *self.prefetches.lock());
        for task in pending {
            if let Err(err) = task.await {
                warn!("Prefetch task did not complete: {}", err);
            }
        }
    }
}
