use reqwest::StatusCode;
use thiserror::Error;

/// Failures that end a run before any output is produced.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("bad response: HTTP {status} for {url}")]
    BadResponse { status: StatusCode, url: String },

    #[error("no results found for '{0}', try a new search")]
    NoSearchResults(String),

    #[error("no IMSDb script found for '{query}' (top hit was {url}), try a new search")]
    NotAScriptPage { query: String, url: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
