//! Derived views over the link collection
//!
//! A `LinkFilter` combines a free-text search with an optional category.
//! Both conditions must hold for a link to be included.

use crate::models::Link;

/// Search text plus optional category selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    search: String,
    category: Option<String>,
}

impl LinkFilter {
    /// Build a filter
    ///
    /// An empty `search` matches every link; a `None` category applies
    /// no category filtering.
    pub fn new(search: &str, category: Option<&str>) -> Self {
        Self {
            search: search.to_lowercase(),
            category: category.map(str::to_string),
        }
    }

    /// Whether the filter lets everything through
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.category.is_none()
    }

    /// Check a single link against the filter
    pub fn matches(&self, link: &Link) -> bool {
        let text_ok = self.search.is_empty() || link.matches_text(&self.search);
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| link.category == c);
        text_ok && category_ok
    }

    /// Filter `links`, keeping their relative order
    pub fn apply<'a>(&self, links: &'a [Link]) -> Vec<&'a Link> {
        links.iter().filter(|link| self.matches(link)).collect()
    }
}
