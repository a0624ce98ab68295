//! Link collection persistence
//!
//! The whole collection is stored as one JSON array under a single key.
//! Saves always replace the stored blob; loads fail soft and return an
//! empty collection when nothing usable is stored.

use tracing::{debug, warn};

use super::{KeyValueStorage, StorageResult};
use crate::models::Link;

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "saved-links";

/// Persistence adapter for the link collection
pub struct LinkPersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> LinkPersistence<S> {
    /// Create an adapter storing the collection under `key`
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key holding the collection
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Access the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored collection
    ///
    /// Returns an empty collection if nothing is stored, the storage
    /// cannot be read, or the stored content does not parse.
    pub fn load(&self) -> Vec<Link> {
        let content = match self.storage.get(&self.key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!(key = %self.key, "No stored links");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored links, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Link>>(&content) {
            Ok(links) => {
                debug!(key = %self.key, count = links.len(), "Loaded links");
                links.into_iter().map(tidy).collect()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored links are malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the stored collection with `links`
    pub fn save(&mut self, links: &[Link]) -> StorageResult<()> {
        let content = serde_json::to_string(links)?;
        self.storage.set(&self.key, &content)?;
        debug!(key = %self.key, count = links.len(), "Saved links");
        Ok(())
    }

    /// Remove the stored collection
    pub fn clear(&mut self) -> StorageResult<()> {
        self.storage.remove(&self.key)
    }
}

/// Blank descriptions in stored data are treated as absent
fn tidy(mut link: Link) -> Link {
    if link
        .description
        .as_deref()
        .is_some_and(|d| d.trim().is_empty())
    {
        link.description = None;
    }
    link
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    fn sample_links() -> Vec<Link> {
        let mut docs = Link::new("Docs", "https://docs.rs", Some("API docs".to_string()), "Learning");
        docs.id = "2".to_string();
        let mut news = Link::new("News", "http://news.example.com", None, "Other");
        news.id = "1".to_string();
        vec![docs, news]
    }

    #[test]
    fn test_load_empty_storage() {
        let persistence = LinkPersistence::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let mut persistence = LinkPersistence::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let links = sample_links();

        persistence.save(&links).unwrap();
        assert_eq!(persistence.load(), links);
    }

    #[test]
    fn test_save_replaces_previous() {
        let mut persistence = LinkPersistence::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let links = sample_links();

        persistence.save(&links).unwrap();
        persistence.save(&links[1..]).unwrap();
        assert_eq!(persistence.load(), links[1..].to_vec());
    }

    #[test]
    fn test_save_and_load_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let links = sample_links();

        let mut persistence =
            LinkPersistence::new(FileStorage::new(temp_dir.path()), DEFAULT_STORAGE_KEY);
        persistence.save(&links).unwrap();

        // A fresh adapter sees the same data
        let reopened = LinkPersistence::new(FileStorage::new(temp_dir.path()), DEFAULT_STORAGE_KEY);
        assert_eq!(reopened.load(), links);
    }

    #[test]
    fn test_corrupted_blob_loads_empty() {
        for blob in ["not json", "{\"id\": 1}", "[{\"title\": \"missing fields\"}]", ""] {
            let storage = MemoryStorage::with_value(DEFAULT_STORAGE_KEY, blob);
            let persistence = LinkPersistence::new(storage, DEFAULT_STORAGE_KEY);
            assert!(persistence.load().is_empty(), "blob {:?} should load empty", blob);
        }
    }

    #[test]
    fn test_unreadable_storage_loads_empty() {
        // An invalid key makes every file read fail
        let temp_dir = TempDir::new().unwrap();
        let persistence = LinkPersistence::new(FileStorage::new(temp_dir.path()), "../bad");
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_reads_original_format() {
        let blob = r#"[
            {"id":"1712345678901","title":"React","url":"https://react.dev","description":"Docs","category":"Learning","createdAt":"2024-04-05T19:34:38.901Z"},
            {"id":"1712345600000","title":"Shop","url":"https://shop.example.com","category":"Shopping","createdAt":"2024-04-05T19:33:20.000Z"}
        ]"#;
        let storage = MemoryStorage::with_value(DEFAULT_STORAGE_KEY, blob);
        let persistence = LinkPersistence::new(storage, DEFAULT_STORAGE_KEY);

        let links = persistence.load();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].description.as_deref(), Some("Docs"));
        assert!(links[1].description.is_none());
    }

    #[test]
    fn test_blank_description_loads_as_absent() {
        let blob = r#"[
            {"id":"2","title":"Empty","url":"https://a.com","description":"","category":"Other","createdAt":"2024-04-05T19:34:38.901Z"},
            {"id":"1","title":"Spaces","url":"https://b.com","description":"  ","category":"Other","createdAt":"2024-04-05T19:33:20.000Z"}
        ]"#;
        let storage = MemoryStorage::with_value(DEFAULT_STORAGE_KEY, blob);
        let mut persistence = LinkPersistence::new(storage, DEFAULT_STORAGE_KEY);

        let links = persistence.load();
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.description.is_none()));

        // Saving back drops the field entirely
        persistence.save(&links).unwrap();
        let stored = persistence.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(!stored.contains("description"));
    }

    #[test]
    fn test_clear() {
        let mut persistence = LinkPersistence::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        persistence.save(&sample_links()).unwrap();

        persistence.clear().unwrap();
        assert!(persistence.load().is_empty());
        assert_eq!(persistence.storage().get(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_custom_key() {
        let mut persistence = LinkPersistence::new(MemoryStorage::new(), "work-links");
        persistence.save(&sample_links()).unwrap();

        assert_eq!(persistence.key(), "work-links");
        assert!(persistence.storage().get("work-links").unwrap().is_some());
        assert!(persistence.storage().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
