use catalog_sync_models::{CatalogSummary, ContentType, Episode, NextEpisode};
use reqwest::Client;
use serde::Deserialize;

use crate::error::SourceError;
use crate::html::strip_html;
use crate::http::{get_json, get_json_opt};

const API_BASE: &str = "https://api.tvmaze.com";

/// The catalog returns images either as a bare URL string or as an object
/// offering size variants; both collapse to a single URL, preferring
/// `medium`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TvMazeImage {
    Url(String),
    Variants {
        medium: Option<String>,
        original: Option<String>,
    },
}

impl TvMazeImage {
    fn resolve(self) -> Option<String> {
        match self {
            TvMazeImage::Url(url) => Some(url),
            TvMazeImage::Variants { medium, original } => medium.or(original),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TvMazeExternals {
    pub imdb: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TvMazeShow {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub status: Option<String>,
    pub summary: Option<String>,
    pub image: Option<TvMazeImage>,
    pub weight: Option<u64>,
    pub externals: Option<TvMazeExternals>,
}

#[derive(Debug, Deserialize)]
pub struct TvMazeSearchResult {
    pub show: TvMazeShow,
}

#[derive(Debug, Deserialize)]
pub struct TvMazeEpisode {
    pub season: Option<u32>,
    pub number: Option<u32>,
    pub name: Option<String>,
    pub airstamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TvMazeScheduleEntry {
    pub season: Option<u32>,
    pub number: Option<u32>,
    pub airstamp: Option<String>,
    pub show: TvMazeShow,
}

fn summary_from_show(show: TvMazeShow) -> CatalogSummary {
    let mut summary = CatalogSummary::new(format!("tv:{}", show.id), show.name, ContentType::Tv);
    summary.tvmaze_id = Some(show.id);
    summary.genres = show.genres;
    summary.status = show.status;
    summary.summary = show.summary.as_deref().map(strip_html).unwrap_or_default();
    summary.image = show.image.and_then(TvMazeImage::resolve);
    summary.popularity = show.weight;
    summary.imdb_id = show.externals.and_then(|e| e.imdb);
    summary
}

fn episode_from_wire(episode: TvMazeEpisode) -> Episode {
    Episode {
        season: episode.season.unwrap_or(0),
        number: episode.number.unwrap_or(0),
        name: episode.name,
        airstamp: episode.airstamp,
    }
}

pub async fn search(client: &Client, query: &str) -> Result<Vec<CatalogSummary>, SourceError> {
    let url = format!("{}/search/shows?q={}", API_BASE, urlencoding::encode(query));
    let results: Vec<TvMazeSearchResult> = get_json(client, &url).await?;
    Ok(results
        .into_iter()
        .map(|r| summary_from_show(r.show))
        .collect())
}

pub async fn show_by_id(client: &Client, id: u64) -> Result<Option<CatalogSummary>, SourceError> {
    let url = format!("{}/shows/{}", API_BASE, id);
    let show: Option<TvMazeShow> = get_json_opt(client, &url).await?;
    Ok(show.map(summary_from_show))
}

pub async fn episodes(client: &Client, id: u64) -> Result<Vec<Episode>, SourceError> {
    let url = format!("{}/shows/{}/episodes", API_BASE, id);
    let episodes: Vec<TvMazeEpisode> = get_json(client, &url).await?;
    Ok(episodes.into_iter().map(episode_from_wire).collect())
}

pub async fn lookup_by_imdb(
    client: &Client,
    imdb_id: &str,
) -> Result<Option<CatalogSummary>, SourceError> {
    let url = format!(
        "{}/lookup/shows?imdb={}",
        API_BASE,
        urlencoding::encode(imdb_id)
    );
    let show: Option<TvMazeShow> = get_json_opt(client, &url).await?;
    Ok(show.map(summary_from_show))
}

/// Today's airing schedule. Each entry carries the episode being broadcast;
/// that episode becomes the summary's `next_episode`.
pub async fn schedule_today(client: &Client) -> Result<Vec<CatalogSummary>, SourceError> {
    let url = format!("{}/schedule", API_BASE);
    let entries: Vec<TvMazeScheduleEntry> = get_json(client, &url).await?;
    Ok(entries
        .into_iter()
        .map(|entry| {
            let next = entry.airstamp.map(|airstamp| NextEpisode {
                season: entry.season.unwrap_or(0),
                number: entry.number.unwrap_or(0),
                airstamp,
            });
            let mut summary = summary_from_show(entry.show);
            summary.next_episode = next;
            summary
        })
        .collect())
}

/// The catalog's index page carries a 0-100 `weight` popularity signal;
/// ordering the first page by descending weight stands in for a dedicated
/// popularity endpoint.
pub async fn popular_shows(client: &Client) -> Result<Vec<CatalogSummary>, SourceError> {
    let url = format!("{}/shows?page=0", API_BASE);
    let shows: Vec<TvMazeShow> = get_json(client, &url).await?;
    let mut summaries: Vec<CatalogSummary> = shows.into_iter().map(summary_from_show).collect();
    summaries.sort_by_key(|s| std::cmp::Reverse(s.popularity.unwrap_or(0)));
    Ok(summaries)
}

pub async fn search_by_genre(
    client: &Client,
    genre: &str,
) -> Result<Vec<CatalogSummary>, SourceError> {
    let url = format!("{}/shows?page=0", API_BASE);
    let shows: Vec<TvMazeShow> = get_json(client, &url).await?;
    let mut summaries: Vec<CatalogSummary> = shows
        .into_iter()
        .filter(|show| show.genres.iter().any(|g| g.eq_ignore_ascii_case(genre)))
        .map(summary_from_show)
        .collect();
    summaries.sort_by_key(|s| std::cmp::Reverse(s.popularity.unwrap_or(0)));
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_variants_prefer_medium() {
        let image = TvMazeImage::Variants {
            medium: Some("http://img/medium.jpg".to_string()),
            original: Some("http://img/original.jpg".to_string()),
        };
        assert_eq!(image.resolve().as_deref(), Some("http://img/medium.jpg"));
    }

    #[test]
    fn image_variants_fall_back_to_original() {
        let image = TvMazeImage::Variants {
            medium: None,
            original: Some("http://img/original.jpg".to_string()),
        };
        assert_eq!(image.resolve().as_deref(), Some("http://img/original.jpg"));
    }

    #[test]
    fn bare_url_deserializes() {
        let image: TvMazeImage = serde_json::from_str("\"http://img/poster.jpg\"").unwrap();
        assert_eq!(image.resolve().as_deref(), Some("http://img/poster.jpg"));
    }

    #[test]
    fn maps_show_payload() {
        let raw = r#"{
            "id": 82,
            "name": "Game of Thrones",
            "genres": ["Drama", "Fantasy"],
            "status": "Ended",
            "summary": "<p>Seven noble families.</p>",
            "image": {"medium": "http://img/m.jpg", "original": "http://img/o.jpg"},
            "weight": 98,
            "externals": {"imdb": "tt0944947"}
        }"#;
        let show: TvMazeShow = serde_json::from_str(raw).unwrap();
        let summary = summary_from_show(show);
        assert_eq!(summary.id, "tv:82");
        assert_eq!(summary.tvmaze_id, Some(82));
        assert_eq!(summary.content_type, ContentType::Tv);
        assert_eq!(summary.summary, "Seven noble families.");
        assert_eq!(summary.image.as_deref(), Some("http://img/m.jpg"));
        assert_eq!(summary.imdb_id.as_deref(), Some("tt0944947"));
        assert_eq!(summary.popularity, Some(98));
    }

    #[test]
    fn schedule_entry_becomes_next_episode() {
        let raw = r#"{
            "season": 2,
            "number": 5,
            "airstamp": "2026-08-04T20:00:00+00:00",
            "show": {"id": 7, "name": "Example"}
        }"#;
        let entry: TvMazeScheduleEntry = serde_json::from_str(raw).unwrap();
        let next = entry.airstamp.clone();
        assert!(next.is_some());
        assert_eq!(entry.show.id, 7);
    }
}
