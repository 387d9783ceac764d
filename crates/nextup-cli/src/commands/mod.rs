pub mod browse;
pub mod config;
pub mod daemon;
pub mod list;
pub mod refresh;
pub mod track;
pub mod transfer;

use std::sync::Arc;
use std::time::Duration;

use catalog_sync_config::{Config, PathManager};
use catalog_sync_core::Aggregator;
use catalog_sync_sources::{RateLimiter, ANIME_SOURCE_KEY};
use color_eyre::Result;

pub(crate) struct Environment {
    pub paths: PathManager,
    pub config: Config,
}

pub(crate) fn load_environment() -> Result<Environment> {
    let paths = PathManager::default();
    paths.ensure_directories().map_err(|e| color_eyre::eyre::eyre!(e))?;
    let config = Config::load_or_default(&paths.config_file()).map_err(|e| color_eyre::eyre::eyre!(e))?;
    Ok(Environment { paths, config })
}

/// All three clients share one limiter; the anime spacing comes from the
/// config file.
pub(crate) fn build_aggregator(config: &Config) -> Aggregator {
    let limiter = RateLimiter::new().with_interval(
        ANIME_SOURCE_KEY,
        Duration::from_millis(config.sources.anime_min_interval_ms),
    );
    Aggregator::with_limiter(Arc::new(limiter))
}
