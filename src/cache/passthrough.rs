use super::{Accessor, Cache, FetchResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Forwards every `get` straight to the accessor. Used when a pager runs
/// with caching disabled.
pub struct PassThrough<K, V> {
    accessor: Arc<dyn Accessor<K, V>>,
}

impl<K, V> PassThrough<K, V> {
    pub fn new(accessor: impl Accessor<K, V> + 'static) -> Self {
        Self::from_shared(Arc::new(accessor))
    }

    pub fn from_shared(accessor: Arc<dyn Accessor<K, V>>) -> Self {
        PassThrough { accessor }
    }
}

#[async_trait]
impl<K, V> Cache<K, V> for PassThrough<K, V>
where
    K: Send + 'static,
    V: Send + 'static,
{
    async fn get(&self, key: K) -> FetchResult<V> {
        self.accessor.fetch(key).await
    }

    fn reset(&self) {}
}
