//! Credentials attached to every catalog API request.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::fmt;

use crate::error::{Error, Result};

/// Name of the API key header expected by the catalog service.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Bearer token and API key used to talk to the catalog service.
///
/// The token is obtained out of band (for instance from a logged-in browser
/// session). It is never printed by the `Debug` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    bearer_token: String,
    api_key: String,
}

impl Credentials {
    /// API key sent by the official web client.
    pub const DEFAULT_API_KEY: &'static str = "mixamo2";

    /// Create credentials with the default API key.
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            api_key: Self::DEFAULT_API_KEY.into(),
        }
    }

    /// Replace the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Get the bearer token.
    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Whether a non-blank bearer token is present.
    pub fn has_token(&self) -> bool {
        !self.bearer_token.trim().is_empty()
    }

    /// Build the headers shared by every API request.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.bearer_token))
            .map_err(|_| Error::Configuration("bearer token contains invalid characters".into()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| Error::Configuration("API key contains invalid characters".into()))?;
        headers.insert(API_KEY_HEADER, api_key);

        Ok(headers)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &"<redacted>")
            .field("api_key", &self.api_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        let headers = Credentials::new("abc").headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "mixamo2");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_custom_api_key() {
        let creds = Credentials::new("abc").with_api_key("other");
        assert_eq!(creds.api_key(), "other");
        assert_eq!(creds.headers().unwrap().get(API_KEY_HEADER).unwrap(), "other");
    }

    #[test]
    fn test_invalid_token() {
        let err = Credentials::new("bad\ntoken").headers().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", Credentials::new("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_blank_token() {
        assert!(!Credentials::new("  ").has_token());
        assert!(Credentials::new("t").has_token());
    }
}
