use colored::*;
use dotenv::dotenv;
use env_logger::Env;
use page_cache::{ApiPager, DisplayError, FetchError, PageResponse, PagerOptions};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

const PER_PAGE: usize = 10;

/// Simulated remote API: serves slices of `records` with some latency.
async fn fetch_page(records: Arc<Vec<u32>>, page: i64) -> Result<PageResponse<u32>, FetchError> {
    let latency = rand::thread_rng().gen_range(20..120);
    tokio::time::sleep(Duration::from_millis(latency)).await;

    if page < 1 {
        return Err(FetchError::Failed(format!("invalid page {}", page)));
    }
    let start = (page as usize - 1) * PER_PAGE;
    let items = records.iter().skip(start).take(PER_PAGE).copied().collect();
    Ok(PageResponse {
        items,
        page,
        per_page: PER_PAGE as i64,
        total_count: records.len() as i64,
    })
}

async fn show_page(items: Vec<u32>) -> Result<(), DisplayError> {
    let line = items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("{}", line.cyan());
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let env = Env::default().filter_or("LOG_LEVEL", "info");
    env_logger::Builder::from_env(env).init();

    let options = match std::env::var("PAGER_CONFIG") {
        Ok(path) => PagerOptions::new_from_json(&path).unwrap_or_else(|err| {
            eprintln!("Could not read {}: {}, using defaults", path, err);
            PagerOptions::default()
        }),
        Err(_) => PagerOptions::default(),
    };

    let total = rand::thread_rng().gen_range(25..60);
    let records: Arc<Vec<u32>> = Arc::new((1..=total).collect());
    let pager = ApiPager::new(
        move |page: i64| fetch_page(Arc::clone(&records), page),
        show_page,
        options,
    );

    if let Err(err) = pager.init().await {
        eprintln!("Error: {}", err);
        return;
    }

    let steps = [
        ("next", pager.next_page().await),
        ("next", pager.next_page().await),
        ("previous", pager.previous_page().await),
        ("last", pager.last_page().await),
        ("first", pager.first_page().await),
    ];
    for (name, result) in steps {
        match result {
            Ok(()) => println!(
                "{}",
                format!("{} -> page {}/{}", name, pager.current(), pager.max()).green()
            ),
            Err(err) => eprintln!("{} failed: {}", name, err),
        }
    }
    pager.settle().await;
}
