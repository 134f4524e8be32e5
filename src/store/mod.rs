// Persisted slots - the local-storage analog for the station
// One JSON file per slot under the data dir; anything unreadable falls
// back to the caller's seed value and is never surfaced as an error

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Slot names shared with the web frontend, so an exported browser dump
/// can be dropped straight into the data dir.
pub mod slots {
    pub const USER: &str = "webtv_user";
    pub const VIDEOS: &str = "webtv_videos";
    pub const COMMERCIALS: &str = "webtv_commercials";
    pub const SCHEDULE: &str = "webtv_schedule";
    pub const FAVORITES: &str = "webtv_favorites";
    pub const SPONSORS: &str = "webtv_sponsors";
    pub const THEME: &str = "webtv_theme";
}

/// Handle to the slot directory. Cheap to clone - every component that
/// persists state gets its own copy instead of reaching for a global.
#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    /// Open (and create if needed) the slot directory.
    pub fn open(root: PathBuf) -> anyhow::Result<Self> {
        if !root.exists() {
            fs::create_dir_all(&root)?;
            debug!("created data directory: {}", root.display());
        }
        Ok(Self { root })
    }

    /// Read a slot, falling back to `default` when the slot is missing or
    /// does not parse. A bad slot is logged and overwritten on next save.
    pub fn load_or<T, F>(&self, slot: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.slot_path(slot);
        if !path.exists() {
            debug!("slot '{}' missing, seeding default", slot);
            return default();
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to read slot '{}': {}", slot, e);
                return default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("slot '{}' is malformed ({}), falling back to default", slot, e);
                default()
            }
        }
    }

    /// Rewrite a slot with the current in-memory value.
    pub fn save<T: Serialize>(&self, slot: &str, value: &T) -> anyhow::Result<()> {
        let path = self.slot_path(slot);
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize slot '{}': {}", slot, e))?;
        fs::write(&path, json)
            .map_err(|e| anyhow::anyhow!("failed to write slot '{}': {}", slot, e))?;
        debug!("saved slot '{}'", slot);
        Ok(())
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.root.join(format!("{}.json", slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> StateStore {
        StateStore::open(dir.path().to_path_buf()).expect("store opens")
    }

    #[test]
    fn missing_slot_yields_default() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let value: Vec<String> = store.load_or("nope", || vec!["seed".to_string()]);
        assert_eq!(value, vec!["seed".to_string()]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let written = vec!["a".to_string(), "b".to_string()];
        store.save("list", &written).unwrap();

        let read: Vec<String> = store.load_or("list", Vec::new);
        assert_eq!(read, written);
    }

    #[test]
    fn malformed_slot_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        std::fs::write(dir.path().join("broken.json"), "{not json at all").unwrap();

        let value: Vec<String> = store.load_or("broken", || vec!["fallback".to_string()]);
        assert_eq!(value, vec!["fallback".to_string()]);
    }

    #[test]
    fn clones_share_the_same_directory() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let other = store.clone();

        store.save("shared", &42u32).unwrap();
        let read: u32 = other.load_or("shared", || 0);
        assert_eq!(read, 42);
    }
}
