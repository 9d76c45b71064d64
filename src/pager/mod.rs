pub mod api;
pub mod options;
pub mod state;

pub use options::PagerOptions;
pub use state::{LoadState, PagerState};

use crate::cache::{Accessor, Cache, PassThrough, WindowedCache};
use crate::errors::{DisplayError, PagerError};
use async_trait::async_trait;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

/// Shows a page of data once it is available.
#[async_trait]
pub trait PageDisplay<T>: Send + Sync {
    async fn display(&self, page: T) -> Result<(), DisplayError>;
}

#[async_trait]
impl<T, F, Fut> PageDisplay<T> for F
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), DisplayError>> + Send + 'static,
{
    async fn display(&self, page: T) -> Result<(), DisplayError> {
        (self)(page).await
    }
}

/// Marks the pager as loading for as long as it lives.
struct LoadingGuard {
    state: Arc<Mutex<PagerState>>,
}

impl LoadingGuard {
    fn begin(state: &Arc<Mutex<PagerState>>) -> Self {
        state.lock().begin_load();
        LoadingGuard {
            state: Arc::clone(state),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.lock().finish_load();
    }
}

/// Navigation over an ordered sequence of 1-based pages.
///
/// Every navigation call funnels into [`Pager::display_page`], which loads
/// the page through the cache and hands it to the display callback.
pub struct Pager<T> {
    state: Arc<Mutex<PagerState>>,
    cache: Box<dyn Cache<i64, T>>,
    display: Arc<dyn PageDisplay<T>>,
    options: PagerOptions,
}

impl<T> Pager<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(
        loader: impl Accessor<i64, T> + 'static,
        display: impl PageDisplay<T> + 'static,
        options: PagerOptions,
    ) -> Self {
        Self::with_state(
            Arc::new(Mutex::new(PagerState::new())),
            Arc::new(loader),
            Arc::new(display),
            options,
        )
    }

    pub(crate) fn with_state(
        state: Arc<Mutex<PagerState>>,
        loader: Arc<dyn Accessor<i64, T>>,
        display: Arc<dyn PageDisplay<T>>,
        options: PagerOptions,
    ) -> Self {
        let cache: Box<dyn Cache<i64, T>> = if options.enable_cache {
            Box::new(WindowedCache::from_shared(loader, options.cache_options()))
        } else {
            Box::new(PassThrough::from_shared(loader))
        };
        Pager {
            state,
            cache,
            display,
            options,
        }
    }

    pub fn current(&self) -> i64 {
        self.state.lock().current()
    }

    pub fn max(&self) -> i64 {
        self.state.lock().max()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading()
    }

    /// Snapshot of the pager position and load state.
    pub fn state(&self) -> PagerState {
        self.state.lock().clone()
    }

    pub fn options(&self) -> &PagerOptions {
        &self.options
    }

    /// Declares the number of pages in the data set. A pager always has at
    /// least one page, so values below 1 are raised to 1.
    pub fn set_max(&self, max: i64) {
        if max < 1 {
            warn!("Ignoring page count {}, keeping a single page", max);
        }
        self.state.lock().set_max(max.max(1));
    }

    /// Starts over for a new data set. Loads already underway are not
    /// awaited and still finish afterwards.
    pub fn reset(&self) {
        self.cache.reset();
        self.state.lock().reset();
        debug!("Pager reset");
    }

    /// Waits for pages being prefetched in the background.
    pub async fn settle(&self) {
        self.cache.settle().await;
    }

    /// Loads `page` and displays it. Pages without data are skipped silently.
    ///
    /// The loading flag is raised for the duration of the call and lowered
    /// whatever the outcome.
    pub async fn display_page(&self, page: i64) -> Result<(), PagerError> {
        let _loading = LoadingGuard::begin(&self.state);
        match self.cache.get(page).await? {
            Some(data) => self.display.display(data).await?,
            None => debug!("Page {} has no data, nothing to display", page),
        }
        Ok(())
    }

    pub async fn next_page(&self) -> Result<(), PagerError> {
        self.ensure_idle()?;
        let (current, max) = self.position();
        if current >= max {
            return Ok(());
        }
        self.display_page(current + 1).await?;
        self.state.lock().step_forward();
        info!("Moved to page {}", self.current());
        Ok(())
    }

    pub async fn previous_page(&self) -> Result<(), PagerError> {
        self.ensure_idle()?;
        let (current, _) = self.position();
        if current <= 1 {
            return Ok(());
        }
        self.display_page(current - 1).await?;
        self.state.lock().step_back();
        info!("Moved to page {}", self.current());
        Ok(())
    }

    pub async fn first_page(&self) -> Result<(), PagerError> {
        self.ensure_idle()?;
        self.display_page(1).await?;
        self.state.lock().move_to(1);
        info!("Moved to first page");
        Ok(())
    }

    pub async fn last_page(&self) -> Result<(), PagerError> {
        self.ensure_idle()?;
        let (_, max) = self.position();
        self.display_page(max).await?;
        self.state.lock().move_to_last();
        info!("Moved to last page {}", self.current());
        Ok(())
    }

    /// Jumps straight to `page`, which must lie within `[1, max]`.
    pub async fn goto_page(&self, page: i64) -> Result<(), PagerError> {
        self.ensure_idle()?;
        let (_, max) = self.position();
        if page < 1 || page > max {
            return Err(PagerError::OutOfRange { page, max });
        }
        self.display_page(page).await?;
        self.state.lock().move_to(page);
        info!("Moved to page {}", page);
        Ok(())
    }

    fn position(&self) -> (i64, i64) {
        let state = self.state.lock();
        (state.current(), state.max())
    }

    fn ensure_idle(&self) -> Result<(), PagerError> {
        if self.options.prevent_multiple_loadings && self.is_loading() {
            warn!("Navigation rejected, a page is still loading");
            return Err(PagerError::NavigationInProgress);
        }
        Ok(())
    }
}
