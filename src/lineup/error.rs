use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The page markup deviates from the expected shape
    #[error("missing marker '{marker}'")]
    MissingMarker { marker: &'static str },

    #[error("malformed duration '{duration}'")]
    MalformedDuration { duration: String },

    #[error("malformed time '{time}': {source}")]
    MalformedTime {
        time: String,
        source: chrono::ParseError,
    },

    #[error("malformed performer payload from '{url}': {source}")]
    MalformedJson {
        url: String,
        source: serde_json::Error,
    },

    #[error("no day after {0}")]
    DateOutOfRange(NaiveDate),
}

impl ScrapeError {
    pub fn missing(marker: &'static str) -> Self {
        ScrapeError::MissingMarker { marker }
    }
}
