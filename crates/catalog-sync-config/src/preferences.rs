use anyhow::Result;
use catalog_sync_models::SortMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User display preferences, stored whole-file next to the config. Unlike
/// the config file these are written back by the application whenever the
/// user switches sort mode, filter, or view.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    #[serde(default)]
    pub sort_mode: SortMode,
    #[serde(default = "default_status_filter")]
    pub status_filter: String,
    #[serde(default = "default_view")]
    pub current_view: String,
}

fn default_status_filter() -> String {
    "all".to_string()
}

fn default_view() -> String {
    "list".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sort_mode: SortMode::default(),
            status_filter: default_status_filter(),
            current_view: default_view(),
        }
    }
}

impl Preferences {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let preferences: Preferences = toml::from_str(&content)?;
        Ok(preferences)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let preferences = Preferences::load(&dir.path().join("preferences.toml")).unwrap();
        assert_eq!(preferences, Preferences::default());
        assert_eq!(preferences.sort_mode, SortMode::Soonest);
    }

    #[test]
    fn preferences_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let preferences = Preferences {
            sort_mode: SortMode::Alpha,
            status_filter: "airing".to_string(),
            current_view: "popular".to_string(),
        };
        preferences.save(&path).unwrap();

        let loaded = Preferences::load(&path).unwrap();
        assert_eq!(loaded, preferences);
    }
}
