//! Catalog browsing.
//!
//! - [`page`] - wire types ([`AnimationDescriptor`], [`CatalogPage`]) and the
//!   [`PageCursor`] tracking the walk
//! - [`walker`] - the [`CatalogWalker`] fetching one page at a time
//!
//! # Example
//!
//! ```rust,no_run
//! use mixport::catalog::{CatalogQuery, CatalogWalker};
//! use mixport::http::{create_http_client, ApiClient, Credentials, HttpClientConfig, DEFAULT_BASE_URL};
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let api = ApiClient::new(client, Url::parse(DEFAULT_BASE_URL)?, Credentials::new("token"))?;
//! let walker = CatalogWalker::new(api, CatalogQuery::default());
//!
//! let page = walker.fetch_page(1).await?;
//! for animation in &page.animations {
//!     println!("{} {}", animation.id, animation.description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod page;
pub mod walker;

pub use page::{AnimationDescriptor, CatalogPage, PageCursor, Pagination};
pub use walker::{CatalogQuery, CatalogWalker};
