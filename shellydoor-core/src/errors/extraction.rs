#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Status body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),
}
