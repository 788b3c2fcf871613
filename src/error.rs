use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LilError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("API returned the same page cursor twice: {cursor}")]
    PaginationStalled { cursor: String },

    #[error("Gave up after {limit} pages of results")]
    TooManyPages { limit: usize },

    #[error("Refresh worker exited without a result")]
    RefreshAborted,

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("LINEAR_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Menu surface unavailable: {0}")]
    #[cfg_attr(not(target_os = "macos"), allow(dead_code))]
    SurfaceUnavailable(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, LilError>;
