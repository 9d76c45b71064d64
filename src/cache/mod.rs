pub mod passthrough;
pub mod point;
pub mod windowed;

pub use passthrough::PassThrough;
pub use point::PointCache;
pub use windowed::{CacheOptions, WindowedCache};

use crate::errors::FetchError;
use async_trait::async_trait;
use std::future::Future;

/// Outcome of a single fetch. `Ok(None)` means nothing exists at the key,
/// which is not a failure.
pub type FetchResult<V> = Result<Option<V>, FetchError>;

/// Retrieves one unit of data from the source of truth.
///
/// Invalid keys should resolve to `Ok(None)` rather than an error.
#[async_trait]
pub trait Accessor<K, V>: Send + Sync {
    async fn fetch(&self, key: K) -> FetchResult<V>;
}

#[async_trait]
impl<K, V, F, Fut> Accessor<K, V> for F
where
    K: Send + 'static,
    V: Send + 'static,
    F: Fn(K) -> Fut + Send + Sync,
    Fut: Future<Output = FetchResult<V>> + Send + 'static,
{
    async fn fetch(&self, key: K) -> FetchResult<V> {
        (self)(key).await
    }
}

/// A memoizing front for an [`Accessor`].
#[async_trait]
pub trait Cache<K, V>: Send + Sync {
    /// Returns the stored value for `key`, fetching and storing it on a miss.
    async fn get(&self, key: K) -> FetchResult<V>;

    /// Drops every stored entry. In-flight fetches are not cancelled.
    fn reset(&self);

    /// Waits for background work started by earlier `get` calls.
    async fn settle(&self) {}
}
