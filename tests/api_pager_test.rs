use dotenv::dotenv;
use env_logger::Env;
use page_cache::{ApiPager, DisplayError, FetchError, PageDisplay, PageResponse, PagerOptions};
use parking_lot::Mutex;
use std::future::{ready, Ready};
use std::sync::Arc;

type LoadResult = Result<PageResponse<u32>, FetchError>;

fn init_logging() {
    dotenv().ok();
    let env = Env::default().filter_or("LOG_LEVEL", "info");
    let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
}

/// In-memory paginated API over `1..=total`, recording requested pages.
#[derive(Clone)]
struct FakeApi {
    total: u32,
    per_page: u32,
    requests: Arc<Mutex<Vec<i64>>>,
    shown: Arc<Mutex<Vec<Vec<u32>>>>,
}

impl FakeApi {
    fn new(total: u32, per_page: u32) -> Self {
        FakeApi {
            total,
            per_page,
            requests: Arc::new(Mutex::new(Vec::new())),
            shown: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn respond(&self, page: i64, total_count: u32) -> PageResponse<u32> {
        let start = (page.max(1) as u32 - 1) * self.per_page;
        let items = (start + 1..=self.total.min(start + self.per_page)).collect();
        PageResponse {
            items,
            page,
            per_page: self.per_page as i64,
            total_count: total_count as i64,
        }
    }

    fn loader(&self) -> impl Fn(i64) -> Ready<LoadResult> + Send + Sync {
        let api = self.clone();
        move |page: i64| {
            api.requests.lock().push(page);
            let result: LoadResult = Ok(api.respond(page, api.total));
            ready(result)
        }
    }

    fn display(&self) -> impl PageDisplay<Vec<u32>> {
        let shown = self.shown.clone();
        move |items: Vec<u32>| {
            shown.lock().push(items);
            let result: Result<(), DisplayError> = Ok(());
            ready(result)
        }
    }

    fn requests(&self) -> Vec<i64> {
        self.requests.lock().clone()
    }

    fn shown(&self) -> Vec<Vec<u32>> {
        self.shown.lock().clone()
    }
}

#[tokio::test]
async fn test_end_to_end_navigation() {
    init_logging();
    let api = FakeApi::new(35, 10);
    let pager = ApiPager::new(api.loader(), api.display(), PagerOptions::default());

    pager.init().await.unwrap();
    assert_eq!(pager.max(), 4);
    assert_eq!(pager.current(), 1);
    assert_eq!(api.shown(), vec![(1..=10).collect::<Vec<u32>>()]);

    pager.next_page().await.unwrap();
    assert_eq!(pager.current(), 2);
    assert_eq!(api.shown()[1], (11..=20).collect::<Vec<u32>>());

    pager.last_page().await.unwrap();
    assert_eq!(pager.current(), 4);
    assert_eq!(api.shown()[2], (31..=35).collect::<Vec<u32>>());
}

#[tokio::test]
async fn test_previous_page_from_first_page_is_noop() {
    init_logging();
    let api = FakeApi::new(35, 10);
    let pager = ApiPager::new(api.loader(), api.display(), PagerOptions::default());
    pager.init().await.unwrap();

    pager.previous_page().await.unwrap();
    pager.previous_page().await.unwrap();
    assert_eq!(pager.current(), 1);
    assert_eq!(api.shown().len(), 1);
}

#[tokio::test]
async fn test_init_bypasses_cache_then_caches_first_page() {
    init_logging();
    let api = FakeApi::new(35, 10);
    let options = PagerOptions {
        preload: false,
        ..PagerOptions::default()
    };
    let pager = ApiPager::new(api.loader(), api.display(), options);

    pager.init().await.unwrap();
    assert_eq!(api.requests(), vec![1, 1]);

    pager.first_page().await.unwrap();
    assert_eq!(api.requests(), vec![1, 1]);
    assert_eq!(api.shown().len(), 2);
}

#[tokio::test]
async fn test_out_of_range_pages_never_reach_loader() {
    init_logging();
    let api = FakeApi::new(35, 10);
    let pager = ApiPager::new(api.loader(), api.display(), PagerOptions::default());

    pager.init().await.unwrap();
    pager.settle().await;
    pager.last_page().await.unwrap();
    pager.settle().await;

    let requests = api.requests();
    assert!(requests.iter().all(|page| (1..=4).contains(page)));
    assert!(requests.contains(&2));
    assert!(requests.contains(&3));

    pager.display_page(9).await.unwrap();
    assert!(!api.requests().contains(&9));
    assert_eq!(pager.current(), 4);
}

#[tokio::test]
async fn test_empty_data_set_displays_empty_page() {
    init_logging();
    let api = FakeApi::new(0, 10);
    let pager = ApiPager::new(api.loader(), api.display(), PagerOptions::default());

    pager.init().await.unwrap();
    pager.settle().await;
    assert_eq!(pager.max(), 0);
    assert_eq!(api.shown(), vec![Vec::<u32>::new()]);
    assert_eq!(api.requests(), vec![1]);
}

#[tokio::test]
async fn test_page_count_follows_latest_response() {
    init_logging();
    let api = FakeApi::new(55, 10);
    let growing = api.clone();
    let loader = move |page: i64| {
        growing.requests.lock().push(page);
        // The first page still reports the old total.
        let total_count = if page == 1 { 35 } else { 55 };
        let result: LoadResult = Ok(growing.respond(page, total_count));
        ready(result)
    };
    let options = PagerOptions {
        preload: false,
        ..PagerOptions::default()
    };
    let pager = ApiPager::new(loader, api.display(), options);

    pager.init().await.unwrap();
    assert_eq!(pager.max(), 4);

    pager.next_page().await.unwrap();
    assert_eq!(pager.max(), 6);

    pager.last_page().await.unwrap();
    assert_eq!(pager.current(), 6);
    assert_eq!(api.shown().last().unwrap(), &(51..=55).collect::<Vec<u32>>());
}

#[tokio::test]
async fn test_init_failure_propagates() {
    init_logging();
    let api = FakeApi::new(35, 10);
    let pager = ApiPager::new(
        |_page: i64| {
            let result: LoadResult = Err(FetchError::Failed("api offline".to_string()));
            ready(result)
        },
        api.display(),
        PagerOptions::default(),
    );

    let err = pager.init().await.unwrap_err();
    assert_eq!(err.to_string(), "Pager error: Fetch failed: api offline");
    assert_eq!(pager.max(), 1);
    assert!(!pager.is_loading());
    assert!(api.shown().is_empty());
}

#[tokio::test]
async fn test_reset_then_init_starts_over() {
    init_logging();
    let api = FakeApi::new(35, 10);
    let pager = ApiPager::new(api.loader(), api.display(), PagerOptions::default());

    pager.init().await.unwrap();
    pager.goto_page(3).await.unwrap();
    pager.settle().await;

    pager.reset();
    assert_eq!(pager.current(), 1);
    assert_eq!(pager.max(), 1);

    pager.init().await.unwrap();
    assert_eq!(pager.max(), 4);
    assert_eq!(pager.current(), 1);
    assert_eq!(api.shown().last().unwrap(), &(1..=10).collect::<Vec<u32>>());
}

#[test]
fn test_page_count() {
    let response = |total_count: i64, per_page: i64| PageResponse::<u32> {
        items: Vec::new(),
        page: 1,
        per_page,
        total_count,
    };
    assert_eq!(response(35, 10).page_count(), 4);
    assert_eq!(response(40, 10).page_count(), 4);
    assert_eq!(response(1, 10).page_count(), 1);
    assert_eq!(response(0, 10).page_count(), 0);
    assert_eq!(response(5, 0).page_count(), 0);
    assert_eq!(response(i64::MAX, 10).page_count(), i64::MAX / 10 + 1);
    assert_eq!(response(i64::MAX, 1).page_count(), i64::MAX);
}

#[test]
fn test_page_response_from_json() {
    let response: PageResponse<String> = serde_json::from_str(
        r#"{"items": ["a", "b"], "page": 2, "per_page": 2, "total_count": 7}"#,
    )
    .unwrap();
    assert_eq!(response.items, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(response.page_count(), 4);
}
