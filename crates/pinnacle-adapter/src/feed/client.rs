//! Line feed HTTP client
//!
//! The feed is public: requests are sent without an Authorization header.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::feed::parse_feed;
use crate::types::FeedEvent;
use crate::FEED_URL;

/// Unauthenticated line feed client
#[derive(Clone)]
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    /// Create a feed client for the default feed URL
    pub fn new() -> Result<Self, ApiError> {
        Self::with_url(FEED_URL)
    }

    /// Create a feed client for a custom feed URL
    pub fn with_url(url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(url, 30)
    }

    /// Create a feed client for a custom feed URL and request timeout
    pub fn with_timeout(url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(Duration::from_secs(timeout_secs)).build()?;
        Ok(Self::with_client(client, url))
    }

    /// Reuse an existing HTTP client
    pub fn with_client(client: Client, url: &str) -> Self {
        Self { client, url: url.to_string() }
    }

    /// GET the feed and parse it into events
    pub async fn fetch(&self) -> Result<Vec<FeedEvent>, ApiError> {
        debug!("GET {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("HTTP {} for {}", status, self.url);
            return Err(ApiError::Status { status, url: self.url.clone(), body });
        }

        let body = response.text().await?;
        let events = parse_feed(&body)?;
        debug!("Parsed {} feed events", events.len());
        Ok(events)
    }
}
