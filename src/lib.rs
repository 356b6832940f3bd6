use futures::StreamExt;
use reqwest::Url;
use scraper::Html;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::{sync::Mutex, time::Duration};
use tracing::{debug, info, warn};

pub mod classify;
pub mod config;
pub mod convert;
pub mod course;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod genai;

pub use classify::LinkClassifier;
pub use config::CrawlConfig;
pub use course::{CourseRecord, Extract, HeuristicExtractor};
pub use error::CrawlerError;
pub use fetch::{Fetch, HttpFetcher};

use classify::has_course_code_hint;

/// Shared traversal state. All mutation happens under one mutex, so a URL is
/// checked-and-marked visited atomically with respect to concurrent workers.
struct CrawlState {
    queue: VecDeque<String>,
    visited: HashSet<String>,
    candidates: HashSet<String>,
    fetched: usize,
    in_flight: usize,
}

impl CrawlState {
    fn seeded(seed_urls: &[String]) -> Self {
        let mut state = Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            candidates: HashSet::new(),
            fetched: 0,
            in_flight: 0,
        };
        for url in seed_urls {
            if state.visited.insert(url.clone()) {
                state.queue.push_back(url.clone());
            }
        }
        state
    }
}

/// Crawls from the configured seeds and extracts course records from every
/// candidate page.
///
/// Traversal is breadth-first over a FIFO queue drained by a pool of fetch
/// workers; links are only followed within the scheme+host of the page they
/// were found on, while code-bearing links become extraction candidates
/// regardless of domain. Extraction starts once every worker has drained, so
/// the candidate set is complete; candidates are processed in lexicographic
/// order and the output order follows it.
pub async fn run_crawler<F, E>(
    config: &CrawlConfig,
    fetcher: F,
    extractor: E,
) -> Result<Vec<CourseRecord>, CrawlerError>
where
    F: Fetch + Send + Sync + 'static,
    E: Extract + Send + Sync,
{
    for seed in &config.seed_urls {
        if let Err(e) = Url::parse(seed) {
            return Err(CrawlerError::InvalidUrl(format!("{}: {}", seed, e)));
        }
    }

    let classifier = Arc::new(LinkClassifier::new(&config.link_keywords)?);
    let fetcher = Arc::new(fetcher);
    let state = Arc::new(Mutex::new(CrawlState::seeded(&config.seed_urls)));
    let concurrency = config.concurrency.max(1);

    info!("Initial queue length: {}", config.seed_urls.len());

    let workers: Vec<_> = (0..concurrency)
        .map(|_| {
            tokio::spawn(traverse(
                Arc::clone(&state),
                Arc::clone(&fetcher),
                Arc::clone(&classifier),
                config.max_pages,
            ))
        })
        .collect();

    // Extraction must not start before every traversal worker has returned;
    // only then is the candidate set complete.
    for worker in workers {
        let _ = worker.await;
    }

    let candidates = {
        let state = state.lock().await;
        let mut candidates: Vec<String> = state.candidates.iter().cloned().collect();
        candidates.sort();
        candidates
    };
    info!("Found {} potential course pages", candidates.len());

    let extracted: Vec<Option<CourseRecord>> = futures::stream::iter(candidates)
        .map(|url| {
            let fetcher = Arc::clone(&fetcher);
            let extractor = &extractor;
            async move {
                match fetcher.fetch(&url).await {
                    Ok(html) => {
                        let doc = Html::parse_document(&html);
                        let record = extractor.extract(&doc, &url);
                        match &record {
                            Some(record) => debug!("Extracted:\n{}", record),
                            None => debug!("No relevant data found at {}", url),
                        }
                        record
                    }
                    Err(e) => {
                        warn!("Error fetching {}: {}", url, e);
                        None
                    }
                }
            }
        })
        .buffered(concurrency)
        .collect()
        .await;

    let mut seen = HashSet::new();
    let records: Vec<CourseRecord> = extracted
        .into_iter()
        .flatten()
        .filter(|record| seen.insert((record.title.clone(), record.source.clone())))
        .collect();

    info!("Extracted {} course records", records.len());
    Ok(records)
}

async fn traverse<F: Fetch>(
    state: Arc<Mutex<CrawlState>>,
    fetcher: Arc<F>,
    classifier: Arc<LinkClassifier>,
    max_pages: usize,
) {
    loop {
        let next = {
            let mut state = state.lock().await;
            if state.fetched >= max_pages {
                // Hard stop: let in-flight fetches finish, follow nothing new.
                if state.in_flight == 0 {
                    break;
                }
                None
            } else if let Some(url) = state.queue.pop_front() {
                state.fetched += 1;
                state.in_flight += 1;
                Some(url)
            } else if state.in_flight == 0 {
                break;
            } else {
                None
            }
        };

        let url = match next {
            Some(url) => url,
            None => {
                // Another worker may still enqueue links.
                tokio::time::sleep(Duration::from_millis(50)).await;
                continue;
            }
        };

        debug!("Crawling {}", url);
        let links = match fetcher.fetch(&url).await {
            Ok(html) => {
                let doc = Html::parse_document(&html);
                classifier.extract_links(&doc, &url)
            }
            Err(e) => {
                warn!("Error fetching {}: {}", url, e);
                Vec::new()
            }
        };

        let mut state = state.lock().await;
        for link in links {
            if !state.visited.insert(link.clone()) {
                continue;
            }
            if same_origin(&link, &url) {
                state.queue.push_back(link.clone());
            }
            if has_course_code_hint(&link) {
                state.candidates.insert(link);
            }
        }
        state.in_flight -= 1;
    }
}

fn same_origin(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a.origin() == b.origin(),
        _ => false,
    }
}
