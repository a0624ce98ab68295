//! Link store
//!
//! The `Store` owns the canonical in-memory collection, newest first, and
//! writes the whole collection through its persistence adapter after
//! every mutation. In-memory state only changes once the write has
//! succeeded.
//!
//! ## Usage
//!
//! ```ignore
//! let config = Config::load()?;
//! let mut store = Store::open_with_config(&config);
//!
//! let draft = LinkDraft::new("Rust", "rust-lang.org").category("Learning");
//! let link = store.add(draft.validate(&config.categories()?)?)?;
//!
//! let hits = store.query("rust", Some("Learning"));
//! ```

use std::collections::{BTreeSet, HashSet};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{generate_id, normalize_url, Link};
use crate::query::LinkFilter;
use crate::storage::{FileStorage, KeyValueStorage, LinkPersistence};
use crate::validation::{LinkChanges, NewLink};

/// Repository of links backed by a single persisted blob
pub struct Store<S> {
    /// Canonical collection, newest first
    links: Vec<Link>,
    /// Persistence adapter
    persistence: LinkPersistence<S>,
}

impl Store<FileStorage> {
    /// Open the file-backed store described by `config`
    pub fn open_with_config(config: &Config) -> Self {
        let storage = FileStorage::new(config.data_dir.clone());
        Self::new(LinkPersistence::new(storage, config.storage_key.clone()))
    }
}

impl<S: KeyValueStorage> Store<S> {
    /// Create a store, loading the collection once from `persistence`
    ///
    /// Records repeating an earlier id are dropped so ids stay unique.
    pub fn new(persistence: LinkPersistence<S>) -> Self {
        let loaded = persistence.load();
        let total = loaded.len();

        let mut seen = HashSet::new();
        let links: Vec<Link> = loaded
            .into_iter()
            .filter(|link| seen.insert(link.id.clone()))
            .collect();

        if links.len() != total {
            warn!(
                dropped = total - links.len(),
                "Dropped stored links with duplicate ids"
            );
        }
        info!(count = links.len(), key = persistence.key(), "Opened link store");

        Self { links, persistence }
    }

    /// Access the persistence adapter
    pub fn persistence(&self) -> &LinkPersistence<S> {
        &self.persistence
    }

    // ==================== Mutations ====================

    /// Add a validated link at the front of the collection
    pub fn add(&mut self, new_link: NewLink) -> Result<Link> {
        let (title, url, description, category) = new_link.into_parts();
        let mut link = Link::new(title, &url, description, category);
        while self.contains(&link.id) {
            link.id = generate_id();
        }

        let mut next = Vec::with_capacity(self.links.len() + 1);
        next.push(link.clone());
        next.extend(self.links.iter().cloned());
        self.commit(next).context("Failed to save new link")?;

        debug!(id = %link.id, url = %link.url, "Added link");
        Ok(link)
    }

    /// Apply validated changes to the link with `id`
    ///
    /// Unknown ids are ignored. The collection is persisted either way.
    pub fn update(&mut self, id: &str, changes: LinkChanges) -> Result<()> {
        let mut next = self.links.clone();
        match next.iter_mut().find(|link| link.id == id) {
            Some(link) => {
                apply_changes(link, changes);
                debug!(id, "Updated link");
            }
            None => debug!(id, "Update ignored, no link with this id"),
        }
        self.commit(next).context("Failed to save updated link")
    }

    /// Remove the link with `id`
    ///
    /// Unknown ids are ignored. The collection is persisted either way.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let next: Vec<Link> = self
            .links
            .iter()
            .filter(|link| link.id != id)
            .cloned()
            .collect();
        if next.len() == self.links.len() {
            debug!(id, "Delete ignored, no link with this id");
        } else {
            debug!(id, "Deleted link");
        }
        self.commit(next).context("Failed to save after delete")
    }

    /// Remove every link and the stored blob
    pub fn clear(&mut self) -> Result<()> {
        self.persistence
            .clear()
            .context("Failed to clear stored links")?;
        self.links.clear();
        info!("Cleared link store");
        Ok(())
    }

    // ==================== Queries ====================

    /// Get a link by id
    pub fn get(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.id == id)
    }

    /// Whether a link with `id` exists
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All links, newest first
    pub fn list(&self) -> &[Link] {
        &self.links
    }

    /// Links matching `search` and, if given, `category`
    ///
    /// Computed on each call; order follows the collection.
    pub fn query(&self, search: &str, category: Option<&str>) -> Vec<&Link> {
        self.filter(&LinkFilter::new(search, category))
    }

    /// Links matching a prepared filter
    pub fn filter(&self, filter: &LinkFilter) -> Vec<&Link> {
        filter.apply(&self.links)
    }

    /// Distinct categories present in the collection
    pub fn categories_in_use(&self) -> BTreeSet<String> {
        self.links.iter().map(|link| link.category.clone()).collect()
    }

    /// Link count per category, in order of first appearance
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for link in &self.links {
            match counts.iter_mut().find(|(name, _)| *name == link.category) {
                Some((_, count)) => *count += 1,
                None => counts.push((link.category.clone(), 1)),
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Persist `next` and make it the current collection
    fn commit(&mut self, next: Vec<Link>) -> Result<()> {
        self.persistence.save(&next)?;
        self.links = next;
        Ok(())
    }
}

fn apply_changes(link: &mut Link, changes: LinkChanges) {
    if let Some(title) = changes.title {
        link.title = title;
    }
    if let Some(url) = changes.url {
        link.url = normalize_url(&url);
    }
    if let Some(description) = changes.description {
        link.description = description.filter(|d| !d.is_empty());
    }
    if let Some(category) = changes.category {
        link.category = category;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Categories;
    use crate::storage::{MemoryStorage, StorageError, StorageResult, DEFAULT_STORAGE_KEY};
    use crate::validation::{LinkDraft, LinkPatch};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn memory_store() -> Store<MemoryStorage> {
        Store::new(LinkPersistence::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY))
    }

    fn new_link(title: &str, url: &str, category: &str) -> NewLink {
        LinkDraft::new(title, url)
            .category(category)
            .validate(&Categories::default())
            .unwrap()
    }

    fn changes(patch: LinkPatch) -> LinkChanges {
        patch.validate(&Categories::default()).unwrap()
    }

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_add_prepends() {
        let mut store = memory_store();
        store.add(new_link("First", "first.com", "Work")).unwrap();
        let second = store.add(new_link("Second", "second.com", "Work")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0], second);
        assert_eq!(store.list()[1].title, "First");
    }

    #[test]
    fn test_add_normalizes_url() {
        let mut store = memory_store();
        let link = store.add(new_link("Example", "example.com", "Other")).unwrap();
        assert_eq!(link.url, "https://example.com");

        let link = store.add(new_link("Plain", "http://example.com", "Other")).unwrap();
        assert_eq!(link.url, "http://example.com");
    }

    #[test]
    fn test_add_persists() {
        let mut store = memory_store();
        let link = store.add(new_link("Example", "example.com", "Other")).unwrap();

        assert_eq!(store.persistence().load(), vec![link]);
    }

    #[test]
    fn test_ids_unique() {
        let mut store = memory_store();
        for i in 0..20 {
            store.add(new_link(&format!("Link {}", i), "example.com", "Other")).unwrap();
        }
        let ids: HashSet<_> = store.list().iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let mut store = memory_store();
        let original = store.add(new_link("Docs", "docs.rs", "Learning")).unwrap();

        store
            .update(&original.id, changes(LinkPatch::new().category("Work")))
            .unwrap();

        let updated = store.get(&original.id).unwrap();
        assert_eq!(updated.category, "Work");
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.url, original.url);
        assert_eq!(updated.description, original.description);
    }

    #[test]
    fn test_update_normalizes_url_and_clears_description() {
        let mut store = memory_store();
        let draft = LinkDraft::new("Docs", "docs.rs").description("API docs");
        let link = store.add(draft.validate(&Categories::default()).unwrap()).unwrap();
        assert!(link.description.is_some());

        store
            .update(&link.id, changes(LinkPatch::new().url("crates.io").description("")))
            .unwrap();

        let updated = store.get(&link.id).unwrap();
        assert_eq!(updated.url, "https://crates.io");
        assert!(updated.description.is_none());
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = memory_store();
        let first = store.add(new_link("First", "first.com", "Other")).unwrap();
        store.add(new_link("Second", "second.com", "Other")).unwrap();

        store
            .update(&first.id, changes(LinkPatch::new().title("Renamed")))
            .unwrap();

        assert_eq!(store.list()[1].title, "Renamed");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = memory_store();
        store.add(new_link("Docs", "docs.rs", "Learning")).unwrap();
        let before = store.list().to_vec();

        store
            .update("missing", changes(LinkPatch::new().title("X")))
            .unwrap();

        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_delete() {
        let mut store = memory_store();
        let keep = store.add(new_link("Keep", "keep.com", "Other")).unwrap();
        let gone = store.add(new_link("Gone", "gone.com", "Other")).unwrap();

        store.delete(&gone.id).unwrap();

        assert_eq!(store.list(), &[keep.clone()]);
        assert!(store.get(&gone.id).is_none());
        assert_eq!(store.persistence().load(), vec![keep]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = memory_store();
        store.add(new_link("One", "one.com", "Other")).unwrap();
        store.add(new_link("Two", "two.com", "Other")).unwrap();
        let before = store.list().to_vec();

        store.delete("missing").unwrap();
        assert_eq!(store.list(), before.as_slice());

        // Deleting twice is fine
        let id = before[0].id.clone();
        store.delete(&id).unwrap();
        store.delete(&id).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_query_empty_returns_list() {
        let mut store = memory_store();
        store.add(new_link("One", "one.com", "Work")).unwrap();
        store.add(new_link("Two", "two.com", "Personal")).unwrap();

        let all: Vec<Link> = store.query("", None).into_iter().cloned().collect();
        assert_eq!(all.as_slice(), store.list());
    }

    #[test]
    fn test_query_description() {
        let mut store = memory_store();
        let categories = Categories::default();
        let with_desc = store
            .add(LinkDraft::new("One", "one.com").description("API docs").validate(&categories).unwrap())
            .unwrap();
        store.add(new_link("Two", "two.com", "Other")).unwrap();

        let results = store.query("doc", None);
        assert_eq!(results, vec![&with_desc]);
    }

    #[test]
    fn test_query_category_subset() {
        let mut store = memory_store();
        store.add(new_link("W1", "w1.com", "Work")).unwrap();
        store.add(new_link("P1", "p1.com", "Personal")).unwrap();
        store.add(new_link("W2", "w2.com", "Work")).unwrap();

        let titles: Vec<_> = store
            .query("", Some("Work"))
            .iter()
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(titles, vec!["W2", "W1"]);
    }

    #[test]
    fn test_categories_in_use_and_counts() {
        let mut store = memory_store();
        assert!(store.categories_in_use().is_empty());

        store.add(new_link("A", "a.com", "Work")).unwrap();
        store.add(new_link("B", "b.com", "Social")).unwrap();
        store.add(new_link("C", "c.com", "Work")).unwrap();

        let in_use: Vec<_> = store.categories_in_use().into_iter().collect();
        assert_eq!(in_use, vec!["Social", "Work"]);

        assert_eq!(
            store.category_counts(),
            vec![("Work".to_string(), 2), ("Social".to_string(), 1)]
        );
    }

    #[test]
    fn test_duplicate_ids_dropped_on_load() {
        let blob = r#"[
            {"id":"1","title":"First","url":"https://a.com","category":"Other","createdAt":"2024-01-01T00:00:00Z"},
            {"id":"1","title":"Dup","url":"https://b.com","category":"Other","createdAt":"2024-01-01T00:00:00Z"}
        ]"#;
        let storage = MemoryStorage::with_value(DEFAULT_STORAGE_KEY, blob);
        let store = Store::new(LinkPersistence::new(storage, DEFAULT_STORAGE_KEY));

        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].title, "First");
    }

    #[test]
    fn test_clear() {
        let mut store = memory_store();
        store.add(new_link("A", "a.com", "Work")).unwrap();

        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(store.persistence().load().is_empty());
    }

    /// Storage whose writes always fail
    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::from_io(
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                PathBuf::from("/readonly"),
            ))
        }

        fn remove(&mut self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_save_leaves_state_unchanged() {
        let mut store = Store::new(LinkPersistence::new(ReadOnlyStorage, DEFAULT_STORAGE_KEY));

        let err = store.add(new_link("A", "a.com", "Work")).unwrap_err();
        assert!(store.is_empty());
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let added = {
            let mut store = Store::open_with_config(&config);
            store.add(new_link("Old", "old.com", "Work")).unwrap();
            store.add(new_link("New", "new.com", "Personal")).unwrap();
            store.list().to_vec()
        };

        let store = Store::open_with_config(&config);
        assert_eq!(store.list(), added.as_slice());
        assert_eq!(store.list()[0].title, "New");
    }

    #[test]
    fn test_corrupted_file_opens_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        std::fs::write(temp_dir.path().join("saved-links.json"), "{ not json").unwrap();

        let mut store = Store::open_with_config(&config);
        assert!(store.is_empty());

        // The next mutation overwrites the corrupted blob
        store.add(new_link("Fresh", "fresh.com", "Other")).unwrap();
        assert_eq!(Store::open_with_config(&config).len(), 1);
    }
}
