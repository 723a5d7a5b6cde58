#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid regex for {key}: {source}")]
    InvalidPattern {
        key: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid status key {key:?}: {message}")]
    InvalidStatusKey { key: String, message: String },

    #[error("Invalid HTTP method {0:?}")]
    InvalidMethod(String),

    #[error("Invalid duration for {key}: {value}")]
    InvalidDuration { key: &'static str, value: f64 },

    #[error("Polling is enabled but statusURL is not set")]
    MissingStatusUrl,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
