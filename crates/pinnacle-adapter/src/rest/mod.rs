//! Authenticated REST backend (v1 / v2 JSON API)
//!
//! Built on reqwest. Each method is one request/response round trip and
//! returns the decoded JSON body or a typed `ApiError`.

pub mod auth;
pub mod client;

pub use auth::*;
pub use client::*;
