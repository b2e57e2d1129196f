use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to Spotify or preparing a run.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport level failure: DNS, connect, timeout, body read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Spotify answered with a non-success status code.
    #[error("Spotify API returned {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        /// Seconds from the `Retry-After` header, sent along with 429 responses.
        retry_after: Option<u64>,
    },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the failure is worth retrying.
    ///
    /// Timeouts, connection failures, rate limiting (429) and server side
    /// errors (5xx) are transient. Client errors such as 401 or 404 and
    /// malformed payloads are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }

    /// Delay requested by the server before the next attempt, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::Api {
                retry_after: Some(secs),
                ..
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: StatusCode) -> Error {
        Error::Api {
            status,
            message: String::new(),
            retry_after: None,
        }
    }

    #[test]
    fn test_rate_limit_and_server_errors_are_transient() {
        assert!(api(StatusCode::TOO_MANY_REQUESTS).is_transient());
        assert!(api(StatusCode::BAD_GATEWAY).is_transient());
        assert!(api(StatusCode::SERVICE_UNAVAILABLE).is_transient());
    }

    #[test]
    fn test_client_errors_are_permanent() {
        assert!(!api(StatusCode::NOT_FOUND).is_transient());
        assert!(!api(StatusCode::UNAUTHORIZED).is_transient());
        assert!(!Error::Config("missing".into()).is_transient());
    }

    #[test]
    fn test_retry_after_is_exposed() {
        let err = Error::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "slow down".into(),
            retry_after: Some(7),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
        assert_eq!(api(StatusCode::BAD_GATEWAY).retry_after(), None);
    }
}
