pub mod episode;
pub mod show;
pub mod sort;
pub mod summary;

pub use episode::{parse_timestamp, Episode, NextEpisode};
pub use show::{ContentType, Show};
pub use sort::SortMode;
pub use summary::CatalogSummary;
