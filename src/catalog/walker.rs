//! Paginated access to the animation catalog.

use tracing::debug;

use super::page::{CatalogPage, ProductList};
use crate::error::{Error, Result};
use crate::http::ApiClient;

/// Filters applied to every catalog listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Number of animations per page.
    pub limit: u32,
    /// Sort order, empty for the service default.
    pub order: String,
    /// Comma separated product types.
    pub types: String,
    /// Free text search.
    pub query: String,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            limit: 96,
            order: String::new(),
            types: "Motion,MotionPack".into(),
            query: "pose".into(),
        }
    }
}

/// Fetches catalog pages one at a time.
///
/// Failures are reported as [`Error::Network`] and are not retried here.
#[derive(Debug, Clone)]
pub struct CatalogWalker {
    api: ApiClient,
    query: CatalogQuery,
}

impl CatalogWalker {
    pub fn new(api: ApiClient, query: CatalogQuery) -> Self {
        Self { api, query }
    }

    /// Get the listing filters.
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Fetch one page of the catalog.
    pub async fn fetch_page(&self, page: u32) -> Result<CatalogPage> {
        let mut url = self.api.endpoint("products")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &self.query.limit.to_string())
            .append_pair("order", &self.query.order)
            .append_pair("type", &self.query.types)
            .append_pair("query", &self.query.query);

        debug!("Fetching catalog page {}", page);
        let res = self
            .api
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("failed to fetch catalog page {}: {}", page, e)))?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Network(format!(
                "catalog page {} answered with status {}",
                page, status
            )));
        }

        let body = res
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("failed to read catalog page {}: {}", page, e)))?;
        let list: ProductList = serde_json::from_slice(&body)
            .map_err(|e| Error::Network(format!("failed to decode catalog page {}: {}", page, e)))?;

        let page = CatalogPage::from(list);
        debug!(
            "Catalog page {}/{} lists {} animations",
            page.current_page,
            page.total_pages,
            page.animations.len()
        );
        Ok(page)
    }
}
