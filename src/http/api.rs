//! Authenticated access to the catalog API.

use reqwest::{header::HeaderMap, Url};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};

use super::credentials::Credentials;
use crate::error::{Error, Result};

/// Base URL of the public catalog API.
pub const DEFAULT_BASE_URL: &str = "https://www.mixamo.com/api/v1/";

/// HTTP client bound to one API base URL and one set of [`Credentials`].
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: ClientWithMiddleware,
    base_url: Url,
    credentials: Credentials,
    headers: HeaderMap,
}

impl ApiClient {
    /// Create a client for `base_url`.
    ///
    /// A trailing `/` is appended to the base path when missing so that
    /// endpoints are resolved below it rather than next to it.
    pub fn new(client: ClientWithMiddleware, mut base_url: Url, credentials: Credentials) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!(
                "The url \"{}\" cannot be used as an API base",
                base_url
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let headers = credentials.headers()?;

        Ok(Self {
            client,
            base_url,
            credentials,
            headers,
        })
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the credentials used by this client.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resolve `path` against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            Error::InvalidUrl(format!(
                "The endpoint \"{}\" cannot be joined to \"{}\": {}",
                path, self.base_url, e
            ))
        })
    }

    /// Build the URL of a resource below the base URL, percent-encoding
    /// every segment.
    pub fn resource(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start an authenticated GET request.
    pub fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url).headers(self.headers.clone())
    }

    /// Start an authenticated POST request.
    pub fn post(&self, url: Url) -> RequestBuilder {
        self.client.post(url).headers(self.headers.clone())
    }
}
