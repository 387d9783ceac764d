use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Cron expression (with seconds field) for the daemon's refresh job.
    #[serde(default = "default_schedule")]
    pub schedule: String,
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Minimum spacing between anime-catalog requests. The upstream quota
    /// is 3 requests/second.
    #[serde(default = "default_anime_min_interval_ms")]
    pub anime_min_interval_ms: u64,
    /// Items revealed per page of the tracked-show list.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_schedule() -> String {
    // Daily at 06:00
    "0 0 6 * * *".to_string()
}

fn default_true() -> bool {
    true
}

fn default_anime_min_interval_ms() -> u64 {
    333
}

fn default_page_size() -> usize {
    20
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            schedule: default_schedule(),
            run_on_startup: default_true(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            anime_min_interval_ms: default_anime_min_interval_ms(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// A missing config file means defaults; a present but malformed one
    /// is an error the caller should see rather than silently ignore.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
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
    fn defaults_apply_to_an_empty_document() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.scheduler.schedule, "0 0 6 * * *");
        assert!(config.scheduler.run_on_startup);
        assert_eq!(config.sources.anime_min_interval_ms, 333);
        assert_eq!(config.sources.page_size, 20);
    }

    #[test]
    fn partial_sections_keep_the_remaining_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scheduler]
            schedule = "0 30 4 * * *"

            [sources]
            page_size = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.scheduler.schedule, "0 30 4 * * *");
        assert!(config.scheduler.run_on_startup);
        assert_eq!(config.sources.page_size, 10);
        assert_eq!(config.sources.anime_min_interval_ms, 333);
    }

    #[test]
    fn missing_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.sources.page_size, 20);
    }

    #[test]
    fn saved_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.sources.anime_min_interval_ms = 500;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.sources.anime_min_interval_ms, 500);
    }
}
