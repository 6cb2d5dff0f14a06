//! Credentials for the Pinnacle REST API
//!
//! Every v1/v2 request carries HTTP Basic authentication:
//! `Authorization: Basic base64(username:password)`.
//! The XML line feed is public and is never sent credentials.
//!
//! # Source
//! - https://pinnacleapi.github.io/#section/Authentication

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Account credentials
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Create credentials from environment variables
    ///
    /// Expected env vars:
    /// - PINNACLE_USERNAME
    /// - PINNACLE_PASSWORD
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("PINNACLE_USERNAME").ok()?;
        let password = std::env::var("PINNACLE_PASSWORD").ok()?;

        Some(Self { username, password })
    }

    /// Check if credentials are present (non-empty)
    pub fn is_valid(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Value of the `Authorization` header
    pub fn basic_auth_header(&self) -> String {
        let token = BASE64.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        let creds = Credentials::new("Aladdin", "open sesame");
        assert_eq!(creds.basic_auth_header(), "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    }

    #[test]
    fn test_basic_auth_header_long_credentials_single_line() {
        // base64 line wrapping would break the header
        let creds = Credentials::new("u".repeat(64), "p".repeat(64));
        let header = creds.basic_auth_header();
        assert!(!header.contains('\n'));
        let decoded = BASE64.decode(header.trim_start_matches("Basic ")).unwrap();
        assert_eq!(decoded, format!("{}:{}", "u".repeat(64), "p".repeat(64)).into_bytes());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("PB1234567", "hunter2");
        let debug_str = format!("{:?}", creds);
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("PB1234567"));
    }

    #[test]
    fn test_credentials_validity() {
        assert!(Credentials::new("user", "pass").is_valid());
        assert!(!Credentials::new("", "pass").is_valid());
        assert!(!Credentials::new("user", "").is_valid());
    }
}
