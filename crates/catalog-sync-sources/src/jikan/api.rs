use catalog_sync_models::{CatalogSummary, ContentType};
use reqwest::Client;
use serde::Deserialize;

use crate::error::SourceError;
use crate::html::strip_html;
use crate::http::{get_json, get_json_opt};

const API_BASE: &str = "https://api.jikan.moe/v4";

#[derive(Debug, Deserialize)]
pub struct JikanEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct JikanGenreRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u64,
    pub title: String,
    pub title_english: Option<String>,
    pub synopsis: Option<String>,
    pub status: Option<String>,
    pub members: Option<u64>,
    #[serde(default)]
    pub genres: Vec<JikanGenreRef>,
    pub images: Option<JikanImages>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanGenre {
    pub mal_id: u64,
    pub name: String,
}

fn summary_from_anime(anime: JikanAnime) -> CatalogSummary {
    // Localized title when the catalog has one; the romaji title rides
    // along as the original name for the second identity-match attempt.
    let (name, original) = match anime.title_english {
        Some(english) if !english.trim().is_empty() => {
            let original = if english.eq_ignore_ascii_case(&anime.title) {
                None
            } else {
                Some(anime.title)
            };
            (english, original)
        }
        _ => (anime.title, None),
    };

    let mut summary = CatalogSummary::new(format!("mal:{}", anime.mal_id), name, ContentType::Anime);
    summary.original_name = original;
    summary.status = anime.status;
    summary.summary = anime.synopsis.as_deref().map(strip_html).unwrap_or_default();
    summary.popularity = anime.members;
    summary.genres = anime.genres.into_iter().map(|g| g.name).collect();
    summary.image = anime
        .images
        .and_then(|i| i.jpg)
        .and_then(|jpg| jpg.image_url.or(jpg.large_image_url));
    summary
}

pub async fn top_airing(client: &Client, limit: usize) -> Result<Vec<CatalogSummary>, SourceError> {
    let url = format!("{}/top/anime?filter=airing&limit={}", API_BASE, limit);
    let envelope: JikanEnvelope<Vec<JikanAnime>> = get_json(client, &url).await?;
    Ok(envelope.data.into_iter().map(summary_from_anime).collect())
}

pub async fn search(client: &Client, query: &str) -> Result<Vec<CatalogSummary>, SourceError> {
    let url = format!("{}/anime?q={}", API_BASE, urlencoding::encode(query));
    let envelope: JikanEnvelope<Vec<JikanAnime>> = get_json(client, &url).await?;
    Ok(envelope.data.into_iter().map(summary_from_anime).collect())
}

pub async fn by_genre_id(client: &Client, genre_id: u64) -> Result<Vec<CatalogSummary>, SourceError> {
    let url = format!(
        "{}/anime?genres={}&order_by=members&sort=desc",
        API_BASE, genre_id
    );
    let envelope: JikanEnvelope<Vec<JikanAnime>> = get_json(client, &url).await?;
    Ok(envelope.data.into_iter().map(summary_from_anime).collect())
}

pub async fn details_by_id(client: &Client, id: u64) -> Result<Option<CatalogSummary>, SourceError> {
    let url = format!("{}/anime/{}", API_BASE, id);
    let envelope: Option<JikanEnvelope<JikanAnime>> = get_json_opt(client, &url).await?;
    Ok(envelope.map(|e| summary_from_anime(e.data)))
}

pub async fn genre_list(client: &Client) -> Result<Vec<JikanGenre>, SourceError> {
    let url = format!("{}/genres/anime", API_BASE);
    let envelope: JikanEnvelope<Vec<JikanGenre>> = get_json(client, &url).await?;
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anime_payload() -> &'static str {
        r#"{
            "mal_id": 52991,
            "title": "Sousou no Frieren",
            "title_english": "Frieren: Beyond Journey's End",
            "synopsis": "<p>The adventure is over.</p>",
            "status": "Currently Airing",
            "members": 1000000,
            "genres": [{"name": "Adventure"}, {"name": "Fantasy"}],
            "images": {"jpg": {"image_url": "http://img/small.jpg", "large_image_url": "http://img/large.jpg"}}
        }"#
    }

    #[test]
    fn maps_anime_payload() {
        let anime: JikanAnime = serde_json::from_str(anime_payload()).unwrap();
        let summary = summary_from_anime(anime);
        assert_eq!(summary.id, "mal:52991");
        assert_eq!(summary.name, "Frieren: Beyond Journey's End");
        assert_eq!(summary.original_name.as_deref(), Some("Sousou no Frieren"));
        assert_eq!(summary.content_type, ContentType::Anime);
        assert_eq!(summary.status.as_deref(), Some("Currently Airing"));
        assert_eq!(summary.summary, "The adventure is over.");
        assert_eq!(summary.popularity, Some(1000000));
        assert_eq!(summary.image.as_deref(), Some("http://img/small.jpg"));
        assert_eq!(summary.genres, vec!["Adventure", "Fantasy"]);
    }

    #[test]
    fn falls_back_to_romaji_title() {
        let raw = r#"{"mal_id": 1, "title": "Cowboy Bebop", "title_english": null}"#;
        let anime: JikanAnime = serde_json::from_str(raw).unwrap();
        let summary = summary_from_anime(anime);
        assert_eq!(summary.name, "Cowboy Bebop");
        assert!(summary.original_name.is_none());
    }

    #[test]
    fn identical_titles_drop_the_original() {
        let raw = r#"{"mal_id": 2, "title": "Monster", "title_english": "Monster"}"#;
        let anime: JikanAnime = serde_json::from_str(raw).unwrap();
        let summary = summary_from_anime(anime);
        assert_eq!(summary.name, "Monster");
        assert!(summary.original_name.is_none());
    }
}
