//! HTTP plumbing shared by the catalog walker, the export runner and the
//! file sink.
//!
//! - [`client`] - middleware client creation (tracing, retries, proxy)
//! - [`credentials`] - bearer token and API key
//! - [`api`] - client bound to the API base URL and credentials
//!
//! # Example
//!
//! ```rust
//! use mixport::http::{create_http_client, ApiClient, Credentials, HttpClientConfig};
//! use reqwest::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let api = ApiClient::new(
//!     client,
//!     Url::parse("https://www.mixamo.com/api/v1/")?,
//!     Credentials::new("my-token"),
//! )?;
//! let url = api.endpoint("products?page=1")?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod credentials;

pub use api::{ApiClient, DEFAULT_BASE_URL};
pub use client::{create_http_client, HttpClientConfig};
pub use credentials::Credentials;
