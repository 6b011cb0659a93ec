use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Failure of a single call against the REST backend.
///
/// Views never branch on the variant; they show a static message and log this.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
    },
}

pub type Result<T> = std::result::Result<T, ApiError>;
