//! Catalog wire types and the page cursor driving the walk.

use serde::{Deserialize, Serialize};

/// One animation listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    /// Product identifier, used to look up the animation details.
    pub id: String,
    /// Human readable description, reused as the exported product name.
    #[serde(default)]
    pub description: String,
    /// Short product name, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Character the animation is previewed on in the catalog.
    #[serde(
        default,
        rename = "character_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_character: Option<String>,
}

impl AnimationDescriptor {
    /// Create a descriptor with only an id and a description.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            name: None,
            source_character: None,
        }
    }

    /// Best label for logs and progress messages.
    pub fn label(&self) -> &str {
        if !self.description.is_empty() {
            &self.description
        } else {
            self.name.as_deref().unwrap_or(&self.id)
        }
    }
}

/// Pagination block of a catalog response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub num_pages: u32,
}

/// Raw catalog listing response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProductList {
    #[serde(default)]
    pub results: Vec<AnimationDescriptor>,
    pub pagination: Pagination,
}

/// One fetched catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// Animations listed on the page, in catalog order.
    pub animations: Vec<AnimationDescriptor>,
    /// Page number reported by the service.
    pub current_page: u32,
    /// Total number of pages reported by the service.
    pub total_pages: u32,
}

impl From<ProductList> for CatalogPage {
    fn from(list: ProductList) -> Self {
        Self {
            animations: list.results,
            current_page: list.pagination.page,
            total_pages: list.pagination.num_pages,
        }
    }
}

/// Position of the walk through the catalog.
///
/// The page number only moves forward: [`PageCursor::next_page`] always
/// returns the page right after the last one recorded, and `None` once the
/// last page has been recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    character_id: String,
    start_page: u32,
    current_page: Option<u32>,
    total_pages: Option<u32>,
}

impl PageCursor {
    /// Create a cursor that will start at `start_page` (clamped to 1).
    pub fn new(character_id: impl Into<String>, start_page: u32) -> Self {
        Self {
            character_id: character_id.into(),
            start_page: start_page.max(1),
            current_page: None,
            total_pages: None,
        }
    }

    /// Character the walk exports animations for.
    pub fn character_id(&self) -> &str {
        &self.character_id
    }

    /// Last page recorded, if any.
    pub fn current_page(&self) -> Option<u32> {
        self.current_page
    }

    /// Total page count reported by the last recorded page.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Page to fetch next, or `None` when the walk is over.
    pub fn next_page(&self) -> Option<u32> {
        match (self.current_page, self.total_pages) {
            (None, _) => Some(self.start_page),
            (Some(current), Some(total)) if current >= total => None,
            (Some(current), _) => current.checked_add(1),
        }
    }

    /// Record that `page` was fetched and that the catalog has `total_pages` pages.
    pub fn record(&mut self, page: u32, total_pages: u32) {
        debug_assert!(self.current_page.map_or(true, |current| page > current));
        self.current_page = Some(page);
        self.total_pages = Some(total_pages);
    }

    /// Whether every page has been recorded.
    pub fn is_done(&self) -> bool {
        self.next_page().is_none()
    }
}
