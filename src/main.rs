use clap::Parser;
use course_prereq_crawler::{dataset, run_crawler, CrawlConfig, HeuristicExtractor, HttpFetcher};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Crawls academic sites for course prerequisite data.
#[derive(Parser, Debug)]
#[command(name = "course-prereq-crawler")]
struct Args {
    /// JSON crawl configuration file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed URLs, overriding the configured ones
    #[arg(short, long)]
    seed: Vec<String>,

    /// Output path, overriding the configured one
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Hard cap on traversal fetches
    #[arg(long)]
    max_pages: Option<usize>,

    /// Number of concurrent fetch workers
    #[arg(long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CrawlConfig::from_file(path)?,
        None => CrawlConfig::default(),
    };
    if !args.seed.is_empty() {
        config.seed_urls = args.seed;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if let Some(max_pages) = args.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }

    let fetcher = HttpFetcher::new(Duration::from_secs(config.timeout_secs), config.retries)?;
    let records = run_crawler(&config, fetcher, HeuristicExtractor).await?;

    dataset::save_records(&config.output_path, &records)?;
    info!(
        "Crawl complete: {} courses with prerequisites found",
        records.len()
    );

    Ok(())
}
