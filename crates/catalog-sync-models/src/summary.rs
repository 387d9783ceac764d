use serde::{Deserialize, Serialize};

use crate::episode::NextEpisode;
use crate::show::ContentType;

/// A single source's normalized record, prior to merge.
///
/// Adapters fill in whatever their catalog provides and leave the rest
/// empty; the merge policy combines several of these into one record. The
/// cross-reference identifiers (`imdb_id`, `tvmaze_id`) carry the identity
/// matcher's inputs and outputs between sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub id: String,
    pub name: String,
    pub content_type: ContentType,
    /// Original (non-localized) title, when it differs from `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvmaze_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: String,
    /// Member count or catalog weight. Display ordering only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u64>,
    /// Only TV-catalog fragments compute this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_episode: Option<NextEpisode>,
}

impl CatalogSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content_type,
            original_name: None,
            imdb_id: None,
            tvmaze_id: None,
            image: None,
            genres: Vec::new(),
            status: None,
            summary: String::new(),
            popularity: None,
            next_episode: None,
        }
    }
}
