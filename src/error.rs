#[derive(Debug, thiserror::Error)]
pub enum CrawlerError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid link pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("The CSV file must contain the following columns: {0}")]
    MissingColumns(String),

    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("The model returned no text")]
    EmptyCompletion,
}
