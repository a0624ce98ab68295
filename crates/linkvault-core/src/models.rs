//! Data models for LinkVault
//!
//! Defines the link record and the URL normalization shared by the
//! store and the validation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scheme prepended to URLs entered without one
const DEFAULT_SCHEME: &str = "https://";

/// A saved link
///
/// Serialized with camelCase field names so the persisted blob uses
/// `id`, `title`, `url`, `description`, `category` and `createdAt`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Unique identifier (opaque; older collections use timestamp strings)
    pub id: String,
    /// Display title, never empty once stored
    pub title: String,
    /// The URL, always carrying an `http://` or `https://` scheme
    pub url: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category name
    pub category: String,
    /// When this link was created
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Create a link with a fresh id and the current timestamp
    pub(crate) fn new(
        title: impl Into<String>,
        url: &str,
        description: Option<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            url: normalize_url(url),
            description: description.filter(|d| !d.is_empty()),
            category: category.into(),
            created_at: Utc::now(),
        }
    }

    /// Host component of the URL, if it parses
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }

    /// Check whether any text field contains `needle`
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.url.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Generate a new opaque link id
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Ensure a URL carries a scheme
///
/// Trims the input and prepends `https://` unless it already starts with
/// `http://` or `https://`.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, url)
    }
}
