use crate::error::CrawlerError;
use itertools::Itertools;
use lazy_regex::{regex_is_match, Regex};
use lazy_static::lazy_static;
use reqwest::Url;
use scraper::{Html, Selector};

lazy_static! {
    static ref A: Selector = Selector::parse("a").expect("Invalid selector");
}

/// True when the URL carries a digit run shaped like a course code,
/// e.g. the "6-006" in an OCW path or the "101" in "CS-101".
pub fn has_course_code_hint(url: &str) -> bool {
    regex_is_match!(r"\d{2,4}[a-z]?"i, url)
}

/// Filters hyperlinks down to the ones worth crawling for course data.
pub struct LinkClassifier {
    keywords: Vec<Regex>,
}

impl LinkClassifier {
    /// Compiles the keyword patterns case-insensitively.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, CrawlerError> {
        let mut keywords = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let compiled =
                Regex::new(&format!("(?i){}", pattern)).map_err(|e| CrawlerError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
            keywords.push(compiled);
        }
        Ok(Self { keywords })
    }

    /// Extracts candidate course links from a page, resolved against
    /// `base_url` into absolute URLs, sorted and deduplicated.
    pub fn extract_links(&self, doc: &Html, base_url: &str) -> Vec<String> {
        let base = match Url::parse(base_url) {
            Ok(base) => base,
            Err(_) => return Vec::new(),
        };

        doc.select(&A)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .filter_map(|href| base.join(href).ok())
            .map(|url| url.to_string())
            .filter(|url| self.is_course_link(url))
            .map(|url| url.trim_end_matches('/').to_string())
            .sorted()
            .dedup()
            .collect()
    }

    fn is_course_link(&self, url: &str) -> bool {
        if !self.keywords.iter().any(|keyword| keyword.is_match(url)) {
            return false;
        }
        // A code-looking digit run confirms a course page. Without one the
        // link is still kept as "may lead to a course page", unless it is a
        // fragment, script pseudo-protocol or mail link.
        has_course_code_hint(url) || !regex_is_match!(r"#|javascript|mailto"i, url)
    }
}
