//! Public XML line feed
//!
//! # Components
//! - `FeedClient`: unauthenticated fetch of the feed document
//! - `parse_feed`: decodes the fixed feed schema into `FeedEvent` records
//!
//! # Source
//! - http://xml.pinnaclesports.com/pinnacleFeed.aspx

mod client;
pub mod parser;

pub use client::FeedClient;
pub use parser::parse_feed;
