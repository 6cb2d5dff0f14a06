//! Pinnacle Sports API Adapter
//!
//! Components:
//! - `rest`: Authenticated client for the v1 / v2 JSON REST API
//! - `feed`: Public XML line feed (no auth) and its parser
//! - `types`: Request parameter types and feed records
//!
//! Every operation is a single request/response round trip. Nothing is
//! cached, retried or persisted between calls.
//!
//! # Official Documentation
//! - API reference: https://pinnacleapi.github.io/
//! - Line feed: http://xml.pinnaclesports.com/pinnacleFeed.aspx

pub mod error;
pub mod feed;
pub mod rest;
pub mod types;

pub use error::{ApiError, FeedError};
pub use types::*;

/// REST API base URL for v1 resources (fixtures, odds, line, bets, balance)
pub const API_V1_BASE: &str = "https://api.pinnaclesports.com/v1/";

/// REST API base URL for v2 resources (currencies, sports, leagues)
pub const API_V2_BASE: &str = "https://api.pinnaclesports.com/v2/";

/// Public XML line feed (unauthenticated)
pub const FEED_URL: &str = "http://xml.pinnaclesports.com/pinnacleFeed.aspx";
