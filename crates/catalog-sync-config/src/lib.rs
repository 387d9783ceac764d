pub mod config;
pub mod paths;
pub mod preferences;

pub use config::{Config, SchedulerConfig, SourcesConfig};
pub use paths::{container_base_path, PathManager};
pub use preferences::Preferences;
