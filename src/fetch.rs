use crate::error::CrawlerError;
use std::time::Duration;
use tracing::warn;

/// Retrieves the raw content of a URL.
///
/// The crawl loop only depends on this trait, so tests can swap in a canned
/// in-memory implementation.
#[async_trait::async_trait]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String, CrawlerError>;
}

/// HTTP fetcher with a bounded per-request timeout and optional retries.
pub struct HttpFetcher {
    client: reqwest::Client,
    retries: u32,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, retries: u32) -> Result<Self, CrawlerError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, retries })
    }

    async fn get(&self, url: &str) -> Result<String, CrawlerError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(CrawlerError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlerError> {
        let mut attempt = 0;
        loop {
            match self.get(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    warn!("Attempt {}/{} failed for {}: {}", attempt, self.retries, url, e);
                    tokio::time::sleep(Duration::from_millis(250 * u64::from(attempt))).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
