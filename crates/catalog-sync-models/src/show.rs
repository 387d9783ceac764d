use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::episode::NextEpisode;
use crate::summary::CatalogSummary;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Tv,
    Anime,
    Movie,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Tv => "tv",
            ContentType::Anime => "anime",
            ContentType::Movie => "movie",
        }
    }
}

/// The unified tracked-show record.
///
/// Catalog-owned fields are rewritten by the synchronization engine on every
/// refresh; user-owned fields (`priority`, `watch_link`, `watched`,
/// `watched_at`) are seeded at creation and preserved verbatim afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    /// Namespaced by source: `tv:<n>`, `mal:<n>`, `wd:<n>`. Unique within
    /// the tracked collection.
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: String,
    pub content_type: ContentType,
    /// TV-catalog counterpart recovered by the identity matcher when this
    /// record was created from a non-TV source. Lets refresh re-fetch the
    /// episode list without re-running the match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvmaze_id: Option<u64>,
    /// Absent for movies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_episode: Option<NextEpisode>,
    /// ISO-8601; governs staleness. Kept raw so an unparsable value from an
    /// imported file simply counts as stale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_fetched_at: Option<String>,
    #[serde(default)]
    pub priority: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_link: Option<String>,
    #[serde(default)]
    pub watched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched_at: Option<DateTime<Utc>>,
}

impl Show {
    /// Seed a new tracked record from a resolved catalog fragment. All
    /// user-owned fields start cleared; `last_fetched_at` is stamped by the
    /// caller once the fetch that produced the fragment completes.
    pub fn from_summary(summary: &CatalogSummary) -> Self {
        Self {
            id: summary.id.clone(),
            name: summary.name.clone(),
            image: summary.image.clone(),
            genres: summary.genres.clone(),
            status: summary.status.clone(),
            summary: summary.summary.clone(),
            content_type: summary.content_type,
            tvmaze_id: summary.tvmaze_id,
            next_episode: summary.next_episode.clone(),
            last_fetched_at: None,
            priority: false,
            watch_link: None,
            watched: false,
            watched_at: None,
        }
    }

    /// View this record as a merge fragment, e.g. to use the stored values
    /// as a fallback source during refresh.
    pub fn fragment(&self) -> CatalogSummary {
        CatalogSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            content_type: self.content_type,
            original_name: None,
            imdb_id: None,
            tvmaze_id: self.tvmaze_id,
            image: self.image.clone(),
            genres: self.genres.clone(),
            status: self.status.clone(),
            summary: self.summary.clone(),
            popularity: None,
            next_episode: self.next_episode.clone(),
        }
    }
}
