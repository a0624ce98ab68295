//! Allowed link categories
//!
//! The category set is configuration data. Only validation consults it;
//! the store treats categories as plain strings.

use thiserror::Error;

/// Categories offered when no configuration overrides them
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Work",
    "Personal",
    "Learning",
    "Entertainment",
    "Shopping",
    "Social",
    "Other",
];

/// Category assigned when the caller does not pick one
pub const DEFAULT_CATEGORY: &str = "Other";

/// Errors building a category set
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CategoriesError {
    #[error("Category list is empty")]
    Empty,

    #[error("Default category '{0}' is not in the category list")]
    UnknownDefault(String),

    #[error("Category names cannot be blank")]
    Blank,
}

/// The closed set of categories a link may belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories {
    allowed: Vec<String>,
    default: String,
}

impl Categories {
    /// Build a category set
    ///
    /// Duplicate names are collapsed, keeping the first occurrence.
    pub fn new(
        allowed: impl IntoIterator<Item = impl Into<String>>,
        default: impl Into<String>,
    ) -> Result<Self, CategoriesError> {
        let mut names: Vec<String> = Vec::new();
        for name in allowed {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(CategoriesError::Blank);
            }
            if !names.contains(&name) {
                names.push(name);
            }
        }

        if names.is_empty() {
            return Err(CategoriesError::Empty);
        }

        let default = default.into();
        if !names.contains(&default) {
            return Err(CategoriesError::UnknownDefault(default));
        }

        Ok(Self {
            allowed: names,
            default,
        })
    }

    /// Whether `name` is an allowed category (case-sensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.allowed.iter().any(|c| c == name)
    }

    /// The category used when none is given
    pub fn default_category(&self) -> &str {
        &self.default
    }

    /// Iterate over the allowed categories in configured order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            default: DEFAULT_CATEGORY.to_string(),
        }
    }
}
