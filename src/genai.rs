use crate::error::CrawlerError;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Thin pass-through to the Gemini text generation endpoint.
///
/// Not used by the crawl pipeline; callers are expected to catch and report
/// errors rather than let them propagate.
pub struct TextGenerator {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

impl TextGenerator {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CrawlerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// Reads the credential from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, CrawlerError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| CrawlerError::MissingApiKey)?;
        Self::new(api_key)
    }

    /// Generates text for `prompt` with the given model, returning the first
    /// candidate's text.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, CrawlerError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            BASE_URL, model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(CrawlerError::Status {
                url: format!("{}/models/{}:generateContent", BASE_URL, model),
                status: response.status().as_u16(),
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(CrawlerError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_generate_content_response() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    { "content": { "parts": [{ "text": "CS101 covers the basics." }], "role": "model" } }
                ],
                "usageMetadata": { "totalTokenCount": 12 }
            }"#,
        )
        .unwrap();
        let text = payload.candidates[0].content.parts[0].text.clone();
        assert_eq!(text, "CS101 covers the basics.");
    }

    #[test]
    fn empty_candidate_list_parses() {
        let payload: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.candidates.is_empty());
    }
}
