use crate::course::CourseRecord;
use lazy_regex::regex;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    static ref HEADINGS: Selector = Selector::parse("h1, h2, h3").expect(E);
    static ref TITLE: Selector = Selector::parse("title").expect(E);
    static ref PREREQ_LABELS: Selector = Selector::parse("h2, h3, h4, strong").expect(E);
}

/// Extraction strategy for a single fetched page.
///
/// The heuristics misfire on unseen page structures, so the orchestrator only
/// depends on this trait and site-specific extractors can be swapped in.
pub trait Extract {
    fn extract(&self, doc: &Html, source_url: &str) -> Option<CourseRecord>;
}

#[derive(Debug, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    fn title(&self, doc: &Html, source_url: &str) -> String {
        if let Some(heading) = doc
            .select(&HEADINGS)
            .map(|el| element_text(el))
            .find(|text| !text.is_empty())
        {
            return heading;
        }

        if let Some(title) = doc.select(&TITLE).next() {
            let text = element_text(title);
            if !text.is_empty() {
                return text;
            }
        }

        title_from_url(source_url)
    }

    fn raw_prerequisites(&self, doc: &Html) -> Option<String> {
        for label in doc.select(&PREREQ_LABELS) {
            let text = label.text().collect::<String>().to_lowercase();
            if !text.contains("prerequisite") {
                continue;
            }
            if let Some(block) = next_block(label) {
                let text = element_text(block);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }

        // No labelled block: look for an inline "Prerequisites: ..." sentence
        // anywhere in the page text, up to the first sentence terminator.
        let body = doc.root_element().text().collect::<Vec<_>>().join(" ");
        regex!(r"(?i)prerequisites?\s*:?\s*([^.\r\n]+)")
            .captures(&body)
            .map(|captures| collapse_whitespace(&captures[1]))
            .filter(|text| !text.is_empty())
    }
}

impl Extract for HeuristicExtractor {
    fn extract(&self, doc: &Html, source_url: &str) -> Option<CourseRecord> {
        let raw = self.raw_prerequisites(doc)?;

        let title = self.title(doc, source_url);
        if title.is_empty() {
            return None;
        }

        let codes = course_codes(&raw);
        let prerequisites = if codes.is_empty() {
            raw
        } else {
            codes.join(", ")
        };

        Some(CourseRecord {
            title,
            prerequisites,
            source: source_url.to_string(),
        })
    }
}

/// Course codes found in `text`, in order of first appearance, normalized to
/// the "CS101" shape. Identical codes collapse.
pub fn course_codes(text: &str) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for found in regex!(r"(?i)[A-Z]{2,4}\s?\d{2,4}[A-Z]?").find_iter(text) {
        let code = found.as_str().replace(' ', "").to_uppercase();
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

/// First `p`/`ul`/`div` sibling after a prerequisite label, skipping other
/// elements in between.
fn next_block(label: ElementRef) -> Option<ElementRef> {
    label
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| matches!(el.value().name(), "p" | "ul" | "div"))
}

fn element_text(el: ElementRef) -> String {
    collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

fn collapse_whitespace(text: &str) -> String {
    regex!(r"\s+")
        .replace_all(text, " ")
        .trim()
        .to_string()
}

fn title_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .replace(['-', '_'], " ")
        .trim()
        .to_string()
}
