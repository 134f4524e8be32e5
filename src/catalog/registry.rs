use crate::store::StateStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

/// Anything a registry can hold: identified by a string id, serializable
/// into its slot, and able to describe itself for logs.
pub trait CatalogEntry: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
    fn label(&self) -> &str;
}

/// A flat, insertion-ordered collection backed by one persisted slot.
/// Every mutation rewrites the whole slot - the lists are small and the
/// system is single-user, so there is nothing to merge.
pub struct Registry<T: CatalogEntry> {
    slot: &'static str,
    entries: Vec<T>,
    store: StateStore,
}

impl<T: CatalogEntry> Registry<T> {
    /// Load the slot, seeding the default collection when it is missing
    /// or unreadable.
    pub fn load<F>(store: StateStore, slot: &'static str, seed: F) -> Self
    where
        F: FnOnce() -> Vec<T>,
    {
        let entries = store.load_or(slot, seed);
        Self { slot, entries, store }
    }

    /// All current entries, in insertion order.
    pub fn list(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Append a new entry and rewrite the slot.
    pub fn add(&mut self, entry: T) {
        info!("added '{}' to {}", entry.label(), self.slot);
        self.entries.push(entry);
        self.flush();
    }

    /// Replace the entry with a matching id. Unknown ids are a no-op, not
    /// an error.
    pub fn update(&mut self, entry: T) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id() == entry.id()) {
            *existing = entry;
            self.flush();
        }
    }

    /// Filter out the entry with a matching id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        if self.entries.len() != before {
            self.flush();
        }
    }

    fn flush(&self) {
        if let Err(e) = self.store.save(self.slot, &self.entries) {
            warn!("could not persist {}: {}", self.slot, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::media::{self, MediaCategory, MediaItem};
    use crate::store::{slots, StateStore};
    use tempfile::TempDir;

    fn item(id: &str, title: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            title: title.to_string(),
            url: format!("https://example.tv/{}.mp4", id),
            category: MediaCategory::Music,
            sponsored: false,
            duration: 60,
        }
    }

    #[test]
    fn add_update_remove_round_trip_through_the_slot() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::open(dir.path().to_path_buf()).unwrap();

        let mut registry: Registry<MediaItem> =
            Registry::load(store.clone(), slots::VIDEOS, Vec::new);
        registry.add(item("a", "First"));
        registry.add(item("b", "Second"));

        let mut changed = item("a", "First (edited)");
        changed.duration = 90;
        registry.update(changed.clone());
        registry.remove("b");

        // Reading the slot back must yield the same collection by value.
        let persisted: Vec<MediaItem> = store.load_or(slots::VIDEOS, Vec::new);
        assert_eq!(persisted, vec![changed]);
    }

    #[test]
    fn update_on_missing_id_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::open(dir.path().to_path_buf()).unwrap();

        let mut registry: Registry<MediaItem> =
            Registry::load(store, slots::VIDEOS, media::default_media_items);
        let before = registry.list().to_vec();

        registry.update(item("ghost", "Nobody"));
        assert_eq!(registry.list(), before.as_slice());
    }

    #[test]
    fn remove_on_missing_id_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::open(dir.path().to_path_buf()).unwrap();

        let mut registry: Registry<MediaItem> =
            Registry::load(store, slots::VIDEOS, media::default_media_items);

        registry.remove("ghost");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn malformed_slot_falls_back_to_the_seed_items() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("webtv_videos.json"), "][ nonsense").unwrap();
        let store = StateStore::open(dir.path().to_path_buf()).unwrap();

        let registry: Registry<MediaItem> =
            Registry::load(store, slots::VIDEOS, media::default_media_items);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.list()[0].id, "v1");
    }

    #[test]
    fn listing_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::open(dir.path().to_path_buf()).unwrap();

        let mut registry: Registry<MediaItem> =
            Registry::load(store, slots::VIDEOS, Vec::new);
        for id in ["x", "y", "z"] {
            registry.add(item(id, id));
        }

        let ids: Vec<&str> = registry.list().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }
}
