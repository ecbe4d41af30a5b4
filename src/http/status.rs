//! Classification of unsuccessful HTTP responses from the registry.

use reqwest::StatusCode;
use thiserror::Error;

/// A response that arrived but did not carry a usable body.
#[derive(Debug, Error, PartialEq)]
pub enum StatusError {
    /// HTTP 429, or 403 mentioning a rate limit
    #[error("Rate limit exceeded: {0}. Try again later.")]
    RateLimitExceeded(String),
    /// HTTP 404, usually a package the registry does not know about
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Access forbidden: {0}")]
    Forbidden(String),
    /// Other 4xx
    #[error("Request error: {0}")]
    ClientError(String),
    /// 5xx
    #[error("Registry error: {0}")]
    ServerError(String),
}

/// Maps an error produced by `error_for_status()` to a [`StatusError`].
/// Returns `None` when the error does not carry a status (transport failures).
pub fn classify_status(error: &reqwest::Error) -> Option<StatusError> {
    let status = error.status()?;
    let classified = match status {
        StatusCode::TOO_MANY_REQUESTS => {
            StatusError::RateLimitExceeded("Too many requests".to_string())
        }
        StatusCode::FORBIDDEN => {
            if error.to_string().contains("rate limit") {
                StatusError::RateLimitExceeded("Registry rate limit exceeded".to_string())
            } else {
                StatusError::Forbidden("Access to this resource is forbidden".to_string())
            }
        }
        StatusCode::NOT_FOUND => {
            StatusError::NotFound("The requested package was not found".to_string())
        }
        s if s.is_client_error() => StatusError::ClientError(format!("HTTP {} error", s.as_u16())),
        s => StatusError::ServerError(format!("HTTP {} error", s.as_u16())),
    };
    Some(classified)
}
