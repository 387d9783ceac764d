pub mod error;
pub mod html;
pub mod http;
pub mod jikan;
pub mod rate_limit;
pub mod traits;
pub mod tvmaze;
pub mod wikidata;

pub use error::SourceError;
pub use jikan::JikanClient;
pub use rate_limit::{RateLimiter, ANIME_SOURCE_KEY};
pub use traits::CatalogSource;
pub use tvmaze::TvMazeClient;
pub use wikidata::WikidataClient;
