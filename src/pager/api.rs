use super::{PageDisplay, Pager, PagerOptions, PagerState};
use crate::cache::{Accessor, FetchResult};
use crate::errors::{FetchError, PagerError};
use async_trait::async_trait;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;

/// One page of results as returned by a paginated API.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total_count: i64,
}

impl<T> PageResponse<T> {
    /// Number of pages needed to hold `total_count` items.
    pub fn page_count(&self) -> i64 {
        if self.per_page <= 0 || self.total_count <= 0 {
            return 0;
        }
        self.total_count / self.per_page + i64::from(self.total_count % self.per_page != 0)
    }
}

/// Fetches a single page from a paginated API.
#[async_trait]
pub trait PageLoader<T>: Send + Sync {
    async fn load(&self, page: i64) -> Result<PageResponse<T>, FetchError>;
}

#[async_trait]
impl<T, F, Fut> PageLoader<T> for F
where
    T: Send + 'static,
    F: Fn(i64) -> Fut + Send + Sync,
    Fut: Future<Output = Result<PageResponse<T>, FetchError>> + Send + 'static,
{
    async fn load(&self, page: i64) -> Result<PageResponse<T>, FetchError> {
        (self)(page).await
    }
}

/// Turns a [`PageLoader`] into a plain page accessor, keeping the pager's
/// page count in sync with what the API reports.
struct EnvelopeAccessor<T> {
    loader: Arc<dyn PageLoader<T>>,
    state: Arc<Mutex<PagerState>>,
}

#[async_trait]
impl<T> Accessor<i64, Vec<T>> for EnvelopeAccessor<T>
where
    T: Send + Sync + 'static,
{
    async fn fetch(&self, page: i64) -> FetchResult<Vec<T>> {
        let max = self.state.lock().max();
        if max == 0 {
            return Ok(Some(Vec::new()));
        }
        if page < 1 || page > max {
            debug!("Page {} is outside [1, {}], not loading", page, max);
            return Ok(None);
        }

        let response = self.loader.load(page).await?;
        update_max(&self.state, &response);
        Ok(Some(response.items))
    }
}

fn update_max<T>(state: &Mutex<PagerState>, response: &PageResponse<T>) {
    if response.per_page <= 0 {
        warn!(
            "Page {} reported a per_page of {}, treating data set as empty",
            response.page, response.per_page
        );
    }
    state.lock().set_max(response.page_count());
}

/// Pager over an API that paginates on its side and reports totals with
/// every page.
///
/// Call [`ApiPager::init`] once before navigating: it learns the page count
/// and displays the first page. Navigation goes through the inner [`Pager`].
pub struct ApiPager<T> {
    pager: Pager<Vec<T>>,
    loader: Arc<dyn PageLoader<T>>,
    state: Arc<Mutex<PagerState>>,
}

impl<T> ApiPager<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(
        loader: impl PageLoader<T> + 'static,
        display: impl PageDisplay<Vec<T>> + 'static,
        options: PagerOptions,
    ) -> Self {
        let loader: Arc<dyn PageLoader<T>> = Arc::new(loader);
        let state = Arc::new(Mutex::new(PagerState::new()));
        let accessor = EnvelopeAccessor {
            loader: Arc::clone(&loader),
            state: Arc::clone(&state),
        };
        let pager = Pager::with_state(
            Arc::clone(&state),
            Arc::new(accessor),
            Arc::new(display),
            options,
        );
        ApiPager {
            pager,
            loader,
            state,
        }
    }

    /// Loads page 1 straight from the API, bypassing the cache, to learn the
    /// page count, then displays it through the normal path.
    pub async fn init(&self) -> Result<(), PagerError> {
        let response = self.loader.load(1).await?;
        update_max(&self.state, &response);
        info!(
            "{} items over {} pages",
            response.total_count,
            self.pager.max()
        );
        self.pager.display_page(1).await
    }

    /// The underlying pager.
    pub fn pager(&self) -> &Pager<Vec<T>> {
        &self.pager
    }
}

impl<T> Deref for ApiPager<T> {
    type Target = Pager<Vec<T>>;

    fn deref(&self) -> &Self::Target {
        &self.pager
    }
}
