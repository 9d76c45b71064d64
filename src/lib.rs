mod cache;
mod errors;
mod pager;

pub use cache::{
    Accessor, Cache, CacheOptions, FetchResult, PassThrough, PointCache, WindowedCache,
};
pub use errors::{DisplayError, FetchError, PagerError};
pub use pager::api::{ApiPager, PageLoader, PageResponse};
pub use pager::{LoadState, PageDisplay, Pager, PagerOptions, PagerState};
