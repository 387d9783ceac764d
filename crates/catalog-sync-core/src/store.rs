use anyhow::Result;
use catalog_sync_config::PathManager;
use catalog_sync_models::Show;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Whole-collection persistence for tracked shows.
///
/// The engine's only contract with the store is read-whole /
/// write-whole; there are no partial updates, and callers serialize
/// their writes.
pub struct TrackedStore {
    path: PathBuf,
}

impl TrackedStore {
    pub fn new(paths: &PathManager) -> Self {
        Self {
            path: paths.tracked_shows_file(),
        }
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty collection. A corrupt file is logged
    /// and treated as empty rather than aborting the caller.
    pub fn load(&self) -> Vec<Show> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no tracked-show file yet");
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable tracked-show file, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Show>>(&content) {
            Ok(shows) => {
                debug!(count = shows.len(), "loaded tracked collection");
                shows
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt tracked-show file, starting empty");
                Vec::new()
            }
        }
    }

    pub fn save(&self, shows: &[Show]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(shows)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_sync_models::{CatalogSummary, ContentType};

    fn show(id: &str) -> Show {
        Show::from_summary(&CatalogSummary::new(id, "Test", ContentType::Tv))
    }

    #[test]
    fn missing_file_is_an_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = TrackedStore::at_path(dir.path().join("shows.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn collection_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = TrackedStore::at_path(dir.path().join("shows.json"));
        store.save(&[show("tv:1"), show("mal:2")]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "tv:1");
    }

    #[test]
    fn corrupt_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shows.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = TrackedStore::at_path(path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = TrackedStore::at_path(dir.path().join("data").join("shows.json"));
        store.save(&[show("tv:1")]).unwrap();
        assert_eq!(store.load().len(), 1);
    }
}
