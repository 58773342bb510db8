//! Bookmark Store
//!
//! Owns the bookmark collection and is the only place it is mutated. Every
//! mutation is written through to the backend before returning.

use crate::error::{Result, StorageError, StoreError};
use crate::models::{Backend, Bookmark, BookmarkFields, seed_bookmarks};
use chrono::Utc;
use tracing::{debug, info, warn};

pub const BOOKMARKS_KEY: &str = "bookmarks";
pub const THEME_KEY: &str = "theme";

/// Where the in-memory collection came from on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// A valid stored collection was read.
    Stored,
    /// Nothing was stored; the demo set was installed and saved.
    Seeded,
    /// Stored data could not be parsed; the collection was reset to empty.
    Recovered,
}

#[derive(Debug)]
pub struct Store<B: Backend> {
    backend: B,
    bookmarks: Vec<Bookmark>,
    load_source: LoadSource,
}

impl<B: Backend> Store<B> {
    /// Reads the stored collection, seeding or recovering as needed.
    pub fn load(backend: B) -> Result<Self> {
        let raw = backend.read(BOOKMARKS_KEY)?;

        let (bookmarks, load_source) = match raw {
            None => (seed_bookmarks(), LoadSource::Seeded),
            Some(raw) => match serde_json::from_str::<Vec<Bookmark>>(&raw) {
                Ok(bookmarks) => (bookmarks, LoadSource::Stored),
                Err(err) => {
                    warn!(error = %err, "stored bookmarks are corrupt, starting empty");
                    (Vec::new(), LoadSource::Recovered)
                }
            },
        };

        let mut store = Self {
            backend,
            bookmarks,
            load_source,
        };

        if load_source == LoadSource::Seeded {
            info!(count = store.bookmarks.len(), "seeding demo bookmarks");
            store.save()?;
        }

        Ok(store)
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Writes the whole collection to the backend.
    pub fn save(&mut self) -> Result<()> {
        write_collection(&mut self.backend, &self.bookmarks)
    }

    /// Persists `next` and only then adopts it, so a failed write leaves
    /// the in-memory collection matching what is stored.
    fn commit(&mut self, next: Vec<Bookmark>) -> Result<()> {
        write_collection(&mut self.backend, &next)?;
        self.bookmarks = next;
        Ok(())
    }

    pub fn create(&mut self, fields: BookmarkFields) -> Result<&Bookmark> {
        fields.validate()?;

        let bookmark = Bookmark::new(fields);
        let mut next = self.bookmarks.clone();
        next.push(bookmark);
        self.commit(next)?;

        let last = self.bookmarks.len() - 1;
        let created = &self.bookmarks[last];
        info!(id = %created.id, title = %created.title, "bookmark created");
        Ok(created)
    }

    pub fn update(&mut self, id: &str, fields: BookmarkFields) -> Result<&Bookmark> {
        fields.validate()?;

        let index = self.index_of(id)?;
        let mut next = self.bookmarks.clone();
        next[index].apply(fields);
        self.commit(next)?;
        info!(id, "bookmark updated");

        Ok(&self.bookmarks[index])
    }

    /// Flips the pinned flag and returns its new value.
    pub fn toggle_pinned(&mut self, id: &str) -> Result<bool> {
        let index = self.index_of(id)?;
        let mut next = self.bookmarks.clone();
        next[index].pinned = !next[index].pinned;
        let pinned = next[index].pinned;
        self.commit(next)?;
        info!(id, pinned, "bookmark pin toggled");

        Ok(pinned)
    }

    /// Flips the archived flag and returns its new value.
    pub fn toggle_archived(&mut self, id: &str) -> Result<bool> {
        let index = self.index_of(id)?;
        let mut next = self.bookmarks.clone();
        next[index].archived = !next[index].archived;
        let archived = next[index].archived;
        self.commit(next)?;
        info!(id, archived, "bookmark archive toggled");

        Ok(archived)
    }

    pub fn record_visit(&mut self, id: &str) -> Result<&Bookmark> {
        let index = self.index_of(id)?;
        let mut next = self.bookmarks.clone();
        next[index].mark_visited(Utc::now());
        self.commit(next)?;
        info!(id, views = self.bookmarks[index].views, "bookmark visited");

        Ok(&self.bookmarks[index])
    }

    /// Theme preference, stored apart from the collection. Anything other
    /// than `"1"` reads as light.
    pub fn dark_theme(&self) -> bool {
        match self.backend.read(THEME_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<String>(&raw).is_ok_and(|flag| flag == "1"),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "failed to read theme preference");
                false
            }
        }
    }

    pub fn set_dark_theme(&mut self, dark: bool) -> Result<()> {
        let flag = if dark { "1" } else { "0" };
        let content = serde_json::to_string(flag).map_err(StorageError::from)?;
        self.backend.write(THEME_KEY, &content)?;
        debug!(dark, "theme preference saved");
        Ok(())
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.bookmarks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

fn write_collection<B: Backend>(backend: &mut B, bookmarks: &[Bookmark]) -> Result<()> {
    let content = serde_json::to_string_pretty(bookmarks).map_err(StorageError::from)?;
    backend.write(BOOKMARKS_KEY, &content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::MemoryBackend;

    fn fields(title: &str, url: &str) -> BookmarkFields {
        BookmarkFields::from_input(title, "", url, "")
    }

    fn empty_store() -> Store<MemoryBackend> {
        Store::load(MemoryBackend::new().with_entry(BOOKMARKS_KEY, "[]")).unwrap()
    }

    #[test]
    fn load_without_data_seeds_and_persists() {
        let store = Store::load(MemoryBackend::new()).unwrap();
        assert_eq!(store.load_source(), LoadSource::Seeded);
        assert_eq!(store.bookmarks().len(), seed_bookmarks().len());

        let reloaded = Store::load(store.backend().clone()).unwrap();
        assert_eq!(reloaded.load_source(), LoadSource::Stored);
        assert_eq!(reloaded.bookmarks(), store.bookmarks());
    }

    #[test]
    fn load_corrupt_data_recovers_empty_without_writing() {
        let backend = MemoryBackend::new().with_entry(BOOKMARKS_KEY, "{not json");
        let store = Store::load(backend).unwrap();

        assert_eq!(store.load_source(), LoadSource::Recovered);
        assert!(store.bookmarks().is_empty());
        assert_eq!(
            store.backend().read(BOOKMARKS_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn create_rejects_blank_title_without_mutation() {
        let mut store = empty_store();
        let err = store.create(fields("", "http://a.com")).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::MissingTitle)
        ));
        assert!(store.bookmarks().is_empty());
    }

    #[test]
    fn create_appends_and_persists() {
        let mut store = empty_store();
        let id = store.create(fields("Alpha", "https://a.com")).unwrap().id.clone();

        let reloaded = Store::load(store.backend().clone()).unwrap();
        assert_eq!(reloaded.bookmarks().len(), 1);
        assert_eq!(reloaded.get(&id).unwrap().title, "Alpha");
    }

    #[test]
    fn create_generates_unique_ids() {
        let mut store = empty_store();
        let a = store.create(fields("A", "https://a.com")).unwrap().id.clone();
        let b = store.create(fields("B", "https://b.com")).unwrap().id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn update_overwrites_fields_and_keeps_counters() {
        let mut store = empty_store();
        let id = store.create(fields("Alpha", "https://a.com")).unwrap().id.clone();
        store.record_visit(&id).unwrap();
        let added = store.get(&id).unwrap().date_added;

        let updated = store
            .update(&id, BookmarkFields::from_input("Beta", "d", "https://b.com", "x, y"))
            .unwrap();

        assert_eq!(updated.title, "Beta");
        assert_eq!(updated.description, "d");
        assert_eq!(updated.url, "https://b.com");
        assert_eq!(updated.tags, vec!["x", "y"]);
        assert_eq!(updated.views, 1);
        assert_eq!(updated.date_added, added);
    }

    #[test]
    fn update_validates_before_lookup() {
        let mut store = empty_store();
        let id = store.create(fields("Alpha", "https://a.com")).unwrap().id.clone();

        assert!(matches!(
            store.update(&id, fields("Alpha", " ")),
            Err(StoreError::Validation(ValidationError::MissingUrl))
        ));
        assert_eq!(store.get(&id).unwrap().url, "https://a.com");
    }

    #[test]
    fn missing_id_is_not_found_and_leaves_storage_alone() {
        let mut store = empty_store();

        assert!(store.update("nope", fields("A", "https://a.com")).unwrap_err().is_not_found());
        assert!(store.toggle_pinned("nope").unwrap_err().is_not_found());
        assert!(store.toggle_archived("nope").unwrap_err().is_not_found());
        assert!(store.record_visit("nope").unwrap_err().is_not_found());
        assert_eq!(store.backend().read(BOOKMARKS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn toggles_flip_and_return_new_state() {
        let mut store = empty_store();
        let id = store.create(fields("Alpha", "https://a.com")).unwrap().id.clone();

        assert!(store.toggle_pinned(&id).unwrap());
        assert!(!store.toggle_pinned(&id).unwrap());
        assert!(store.toggle_archived(&id).unwrap());
        assert!(store.get(&id).unwrap().archived);
    }

    #[test]
    fn record_visit_increments_by_one() {
        let mut store = empty_store();
        let id = store.create(fields("Alpha", "https://a.com")).unwrap().id.clone();

        let first = store.record_visit(&id).unwrap().last_visited.unwrap();
        let visited = store.record_visit(&id).unwrap();

        assert_eq!(visited.views, 2);
        assert!(visited.last_visited.unwrap() >= first);
    }

    #[test]
    fn theme_preference_persists_independently() {
        let mut store = empty_store();
        assert!(!store.dark_theme());

        store.set_dark_theme(true).unwrap();
        assert!(store.dark_theme());
        assert_eq!(store.backend().read(BOOKMARKS_KEY).unwrap().as_deref(), Some("[]"));

        store.set_dark_theme(false).unwrap();
        assert!(!store.dark_theme());
    }

    #[test]
    fn unexpected_theme_value_reads_as_light() {
        let backend = MemoryBackend::new()
            .with_entry(BOOKMARKS_KEY, "[]")
            .with_entry(THEME_KEY, "true");
        let store = Store::load(backend).unwrap();
        assert!(!store.dark_theme());
    }

    /// Reads from memory but refuses every write, like a full disk.
    struct FullDiskBackend {
        inner: MemoryBackend,
    }

    impl Backend for FullDiskBackend {
        fn read(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.inner.read(key)
        }

        fn write(&mut self, key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    fn full_disk_store() -> Store<FullDiskBackend> {
        let raw = serde_json::to_string(&seed_bookmarks()).unwrap();
        let inner = MemoryBackend::new().with_entry(BOOKMARKS_KEY, &raw);
        Store::load(FullDiskBackend { inner }).unwrap()
    }

    fn assert_unchanged(store: &Store<FullDiskBackend>, before: &[Bookmark]) {
        assert_eq!(store.bookmarks(), before);
        let stored: Vec<Bookmark> =
            serde_json::from_str(&store.backend().read(BOOKMARKS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.as_slice(), before);
    }

    #[test]
    fn failed_write_leaves_create_unapplied() {
        let mut store = full_disk_store();
        let before = store.bookmarks().to_vec();

        let err = store.create(fields("A", "https://a.com")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_unchanged(&store, &before);

        assert!(store.create(fields("A", "https://a.com")).is_err());
        assert_eq!(store.bookmarks().len(), before.len());
    }

    #[test]
    fn failed_write_leaves_update_unapplied() {
        let mut store = full_disk_store();
        let before = store.bookmarks().to_vec();
        let id = before[0].id.clone();

        assert!(store.update(&id, fields("Renamed", "https://r.dev")).is_err());
        assert_unchanged(&store, &before);
    }

    #[test]
    fn failed_write_leaves_toggles_unapplied() {
        let mut store = full_disk_store();
        let before = store.bookmarks().to_vec();
        let id = before[0].id.clone();

        assert!(store.toggle_pinned(&id).is_err());
        assert!(store.toggle_archived(&id).is_err());
        assert_unchanged(&store, &before);
    }

    #[test]
    fn failed_write_leaves_visit_uncounted() {
        let mut store = full_disk_store();
        let before = store.bookmarks().to_vec();
        let id = before[0].id.clone();

        assert!(store.record_visit(&id).is_err());
        assert_unchanged(&store, &before);
    }
}
