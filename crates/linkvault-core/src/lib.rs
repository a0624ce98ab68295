//! LinkVault Core Library
//!
//! This crate provides the core functionality for LinkVault, a personal
//! bookmark manager that keeps its whole collection in local storage.
//!
//! # Architecture
//!
//! - **Store**: owns the in-memory collection and answers queries
//! - **LinkPersistence**: writes the whole collection as one JSON blob
//! - **KeyValueStorage**: where the blob lives (files or memory)
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = Store::open_with_config(&config);
//!
//! // Add a link
//! let draft = LinkDraft::new("Example", "example.com").category("Work");
//! store.add(draft.validate(&config.categories()?)?)?;
//!
//! // Query links
//! let work = store.query("", Some("Work"));
//! ```
//!
//! # Modules
//!
//! - `store`: the link repository (main entry point)
//! - `models`: the link record and URL normalization
//! - `validation`: checks form input before it reaches the store
//! - `category`: the configured category set
//! - `query`: search and category filtering
//! - `storage`: key-value backends and the persistence adapter
//! - `config`: application configuration

pub mod category;
pub mod config;
pub mod models;
pub mod query;
pub mod storage;
pub mod store;
pub mod validation;


pub use category::{Categories, CategoriesError};
pub use config::Config;
pub use models::{normalize_url, Link};
pub use query::LinkFilter;
pub use storage::{
    FileStorage, KeyValueStorage, LinkPersistence, MemoryStorage, StorageError, StorageResult,
};
pub use store::Store;
pub use validation::{LinkChanges, LinkDraft, LinkPatch, NewLink, ValidationError};
