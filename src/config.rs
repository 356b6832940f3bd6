use crate::error::CrawlerError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for a single crawl run.
///
/// Everything the orchestrator needs is carried here so tests can inject
/// fixture seeds and keyword patterns instead of relying on process-wide
/// constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URLs the breadth-first traversal starts from.
    #[serde(default = "default_seed_urls")]
    pub seed_urls: Vec<String>,

    /// Case-insensitive regex patterns marking a link as course-related.
    #[serde(default = "default_link_keywords")]
    pub link_keywords: Vec<String>,

    /// Where the final JSON dataset is written.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Hard cap on traversal fetches, independent of queue emptiness.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Number of concurrent fetch workers.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra fetch attempts after a failure. 0 disables retrying.
    #[serde(default)]
    pub retries: u32,
}

impl CrawlConfig {
    pub fn new<I, S>(seed_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seed_urls: seed_urls.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CrawlerError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_urls: default_seed_urls(),
            link_keywords: default_link_keywords(),
            output_path: default_output_path(),
            max_pages: default_max_pages(),
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
            retries: 0,
        }
    }
}

fn default_seed_urls() -> Vec<String> {
    [
        "https://ocw.mit.edu/courses/find-by-topic/#cat=engineering&subcat=computer-science",
        "https://ocw.mit.edu/courses/find-by-topic/#cat=science&subcat=mathematics",
        "https://onlinecourses.swayam2.ac.in/course_category_list",
        "https://www.bmsce.ac.in/department/computer-science-and-engineering/course-curriculum",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_link_keywords() -> Vec<String> {
    [
        r"courses/",
        r"subjects/",
        r"syllabus/",
        r"curriculum/",
        r"program/",
        r"academic/",
        r"course-detail/",
        // Course codes in the path, like "6-006" or "CS-101"
        r"\d{2,4}[a-z]?-",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data/prereqs.json")
}

fn default_max_pages() -> usize {
    2000
}

fn default_concurrency() -> usize {
    8
}

fn default_timeout_secs() -> u64 {
    10
}
