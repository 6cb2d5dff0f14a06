//! Error types for the Pinnacle adapter
//!
//! Callers can branch on three kinds of failure:
//! - could not reach the service: `Transport` / `Status`
//! - response could not be understood: `Decode` / `Feed`
//! - request never sent: `InvalidRequest`
//!
//! Business rejections (bet refused, insufficient funds, ...) come back as a
//! 2xx JSON body and are returned as `Ok(Value)`.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by `PinnacleClient` and `FeedClient`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}: {body}")]
    Status { status: StatusCode, url: String, body: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Failed to parse line feed: {0}")]
    Feed(#[from] FeedError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Service could not be reached or answered with a non-2xx status
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Status { .. })
    }

    /// Service answered but the body was unparseable
    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode { .. } | ApiError::Feed(_))
    }

    /// HTTP status of a non-2xx response
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Structural errors in the XML line feed
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("<{parent}> is missing required <{element}>")]
    MissingElement { parent: &'static str, element: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let status = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            url: "https://example.com/v1/odds".to_string(),
            body: "".to_string(),
        };
        assert!(status.is_transport());
        assert!(!status.is_decode());
        assert_eq!(status.status(), Some(StatusCode::UNAUTHORIZED));

        let decode = ApiError::Decode { url: "u".to_string(), message: "eof".to_string() };
        assert!(decode.is_decode());
        assert!(!decode.is_transport());
        assert_eq!(decode.status(), None);

        let feed = ApiError::from(FeedError::MissingElement { parent: "event", element: "gamenumber" });
        assert!(feed.is_decode());

        let invalid = ApiError::InvalidRequest("missing handicap".to_string());
        assert!(!invalid.is_decode());
        assert!(!invalid.is_transport());
    }

    #[test]
    fn test_missing_element_message() {
        let err = FeedError::MissingElement { parent: "period", element: "period_number" };
        assert_eq!(err.to_string(), "<period> is missing required <period_number>");
    }
}
