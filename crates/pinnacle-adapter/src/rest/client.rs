//! REST client for the Pinnacle API
//!
//! Base URLs:
//! - v1: https://api.pinnaclesports.com/v1/
//! - v2: https://api.pinnaclesports.com/v2/
//!
//! # Endpoints (all require Basic auth)
//! - GET  v2/currencies
//! - GET  v2/sports
//! - GET  v2/leagues?sportid=
//! - GET  v1/fixtures, v1/fixtures/settled, v1/odds
//! - GET  v1/line
//! - POST v1/bets/place
//! - GET  v1/client/balance
//!
//! # Source
//! - https://pinnacleapi.github.io/

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::feed::FeedClient;
use crate::rest::auth::Credentials;
use crate::types::{
    BetSlip, FeedEvent, FixtureQuery, LineRequest, OddsFormat, PlaceBetOptions, PlaceBetRequest,
};
use crate::{API_V1_BASE, API_V2_BASE, FEED_URL};

/// Client configuration, fixed at construction
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Odds format used when a call does not override it
    pub odds_format: OddsFormat,
    pub v1_base_url: String,
    pub v2_base_url: String,
    pub feed_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            odds_format: OddsFormat::Decimal,
            v1_base_url: API_V1_BASE.to_string(),
            v2_base_url: API_V2_BASE.to_string(),
            feed_url: FEED_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn with_odds_format(mut self, odds_format: OddsFormat) -> Self {
        self.odds_format = odds_format;
        self
    }
}

/// Authenticated Pinnacle API client
#[derive(Clone)]
pub struct PinnacleClient {
    client: Client,
    credentials: Credentials,
    odds_format: OddsFormat,
    v1_base_url: String,
    v2_base_url: String,
    feed_url: String,
}

impl PinnacleClient {
    /// Create a client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self, ApiError> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self {
            client,
            credentials,
            odds_format: config.odds_format,
            v1_base_url: config.v1_base_url.trim_end_matches('/').to_string(),
            v2_base_url: config.v2_base_url.trim_end_matches('/').to_string(),
            feed_url: config.feed_url,
        })
    }

    /// Default odds format of this client
    pub fn odds_format(&self) -> OddsFormat {
        self.odds_format
    }

    /// GET v2/currencies
    pub async fn currencies(&self) -> Result<Value, ApiError> {
        self.get_json(&endpoint(&self.v2_base_url, "currencies"), &[]).await
    }

    /// GET v2/sports, unwrapped to the `sports` array
    pub async fn sports(&self) -> Result<Value, ApiError> {
        let url = endpoint(&self.v2_base_url, "sports");
        let body = self.get_json(&url, &[]).await?;
        take_field(body, "sports", &url)
    }

    /// GET v2/leagues?sportid={sport_id}, unwrapped to the `leagues` array
    pub async fn leagues(&self, sport_id: u32) -> Result<Value, ApiError> {
        let params = [("sportid", sport_id.to_string())];
        let url = endpoint(&self.v2_base_url, "leagues");
        let body = self.get_json(&url, &params).await?;
        take_field(body, "leagues", &url)
    }

    /// GET v1/fixtures
    pub async fn fixtures(&self, sport_id: u32, query: &FixtureQuery) -> Result<Value, ApiError> {
        let params = query.to_params(sport_id, self.odds_format);
        self.get_json(&endpoint(&self.v1_base_url, "fixtures"), &params).await
    }

    /// GET v1/fixtures/settled
    pub async fn settled_fixtures(
        &self,
        sport_id: u32,
        query: &FixtureQuery,
    ) -> Result<Value, ApiError> {
        let params = query.to_params(sport_id, self.odds_format);
        self.get_json(&endpoint(&self.v1_base_url, "fixtures/settled"), &params).await
    }

    /// GET v1/odds
    pub async fn odds(&self, sport_id: u32, query: &FixtureQuery) -> Result<Value, ApiError> {
        let params = query.to_params(sport_id, self.odds_format);
        self.get_json(&endpoint(&self.v1_base_url, "odds"), &params).await
    }

    /// GET v1/line
    ///
    /// Returns the decoded line quote (status, price, lineId, limits).
    pub async fn line(&self, request: &LineRequest) -> Result<Value, ApiError> {
        let params = request.to_params(self.odds_format)?;
        self.get_json(&endpoint(&self.v1_base_url, "line"), &params).await
    }

    /// POST v1/bets/place
    ///
    /// The API answers 200 for both accepted and rejected bets; inspect
    /// `status` / `errorCode` in the returned body.
    pub async fn place_bet(
        &self,
        slip: &BetSlip,
        options: &PlaceBetOptions,
    ) -> Result<Value, ApiError> {
        let body = PlaceBetRequest::new(slip, options, self.odds_format);
        self.post_json(&endpoint(&self.v1_base_url, "bets/place"), &body).await
    }

    /// GET v1/client/balance
    pub async fn balance(&self) -> Result<Value, ApiError> {
        self.get_json(&endpoint(&self.v1_base_url, "client/balance"), &[]).await
    }

    /// Fetch the public XML line feed (sent without credentials)
    pub async fn feed(&self) -> Result<Vec<FeedEvent>, ApiError> {
        FeedClient::with_client(self.client.clone(), &self.feed_url).fetch().await
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.credentials.basic_auth_header())
            .query(params)
            .send()
            .await?;

        decode_json(url, response).await
    }

    async fn post_json<T: Serialize>(&self, url: &str, body: &T) -> Result<Value, ApiError> {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, self.credentials.basic_auth_header())
            .json(body)
            .send()
            .await?;

        decode_json(url, response).await
    }
}

/// Full URL of a resource under a (trimmed) base URL
fn endpoint(base_url: &str, resource: &str) -> String {
    format!("{}/{}", base_url, resource)
}

/// Check status and decode the body as JSON
async fn decode_json(url: &str, response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("HTTP {} for {}", status, url);
        return Err(ApiError::Status { status, url: url.to_string(), body });
    }

    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| ApiError::Decode { url: url.to_string(), message: e.to_string() })
}

/// Unwrap a top-level field of a JSON object
fn take_field(body: Value, key: &str, url: &str) -> Result<Value, ApiError> {
    match body {
        Value::Object(mut map) => map.remove(key).ok_or_else(|| ApiError::Decode {
            url: url.to_string(),
            message: format!("missing `{}` field", key),
        }),
        other => Err(ApiError::Decode {
            url: url.to_string(),
            message: format!("expected object with `{}`, got {}", key, other),
        }),
    }
}
