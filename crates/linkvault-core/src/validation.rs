//! Caller-facing input validation
//!
//! Raw form input (`LinkDraft`, `LinkPatch`) is checked here before it can
//! reach the store. The validated types (`NewLink`, `LinkChanges`) have
//! private fields, so the store never sees an empty title or URL.

use thiserror::Error;

use crate::category::Categories;
use crate::models::normalize_url;

/// Reasons input is rejected before reaching the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title or URL is empty after trimming
    #[error("Please fill in title and URL")]
    MissingField,

    /// An edit blanked the title or URL
    #[error("Title and URL are required")]
    RequiredField,

    /// Category is not in the configured set
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

/// Raw input for a new link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl LinkDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Check the draft and produce a link ready for the store
    pub fn validate(&self, categories: &Categories) -> Result<NewLink, ValidationError> {
        let title = required(&self.title).ok_or(ValidationError::MissingField)?;
        let url = required(&self.url).ok_or(ValidationError::MissingField)?;
        let category = match self.category.as_deref() {
            Some(c) => known_category(c, categories)?,
            None => categories.default_category().to_string(),
        };

        Ok(NewLink {
            title,
            url: normalize_url(&url),
            description: optional(self.description.as_deref()),
            category,
        })
    }
}

/// A validated new link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    title: String,
    url: String,
    description: Option<String>,
    category: String,
}

impl NewLink {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub(crate) fn into_parts(self) -> (String, String, Option<String>, String) {
        (self.title, self.url, self.description, self.category)
    }
}

/// Raw input for editing a link
///
/// Only fields set to `Some` are changed. A description of `Some("")`
/// clears the stored description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl LinkPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.category.is_none()
    }

    /// Check the patch and produce changes ready for the store
    pub fn validate(&self, categories: &Categories) -> Result<LinkChanges, ValidationError> {
        let title = self
            .title
            .as_deref()
            .map(|t| required(t).ok_or(ValidationError::RequiredField))
            .transpose()?;
        let url = self
            .url
            .as_deref()
            .map(|u| {
                required(u)
                    .map(|u| normalize_url(&u))
                    .ok_or(ValidationError::RequiredField)
            })
            .transpose()?;
        let category = self
            .category
            .as_deref()
            .map(|c| known_category(c, categories))
            .transpose()?;
        let description = self.description.as_deref().map(|d| optional(Some(d)));

        Ok(LinkChanges {
            title,
            url,
            description,
            category,
        })
    }
}

/// Validated partial update
///
/// Has no `id` or `created_at` fields: those can never be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkChanges {
    pub(crate) title: Option<String>,
    pub(crate) url: Option<String>,
    /// `Some(None)` clears the description
    pub(crate) description: Option<Option<String>>,
    pub(crate) category: Option<String>,
}

impl LinkChanges {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

fn required(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn known_category(name: &str, categories: &Categories) -> Result<String, ValidationError> {
    if categories.contains(name) {
        Ok(name.to_string())
    } else {
        Err(ValidationError::UnknownCategory(name.to_string()))
    }
}
