use std::sync::Arc;

use async_trait::async_trait;
use catalog_sync_models::CatalogSummary;
use reqwest::Client;
use tracing::warn;

use crate::error::SourceError;
use crate::jikan::api;
use crate::jikan::genres::GenreCache;
use crate::rate_limit::{RateLimiter, ANIME_SOURCE_KEY};
use crate::traits::CatalogSource;

/// Anime catalog client. The upstream enforces a 3-requests/second quota,
/// so every call acquires the shared limiter's `anime` slot first.
pub struct JikanClient {
    client: Client,
    limiter: Arc<RateLimiter>,
    genres: GenreCache,
}

impl JikanClient {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self {
            client: Client::new(),
            limiter,
            genres: GenreCache::new(),
        }
    }

    pub async fn top_airing(&self, limit: usize) -> Result<Vec<CatalogSummary>, SourceError> {
        self.limiter.acquire(ANIME_SOURCE_KEY).await;
        api::top_airing(&self.client, limit).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<CatalogSummary>, SourceError> {
        self.limiter.acquire(ANIME_SOURCE_KEY).await;
        api::search(&self.client, query).await
    }

    /// Browse by genre name, resolving it through the cached genre list;
    /// names the catalog does not know degrade to a free-text search.
    pub async fn by_genre(&self, genre: &str) -> Result<Vec<CatalogSummary>, SourceError> {
        match self.genres.resolve(&self.client, &self.limiter, genre).await {
            Ok(Some(genre_id)) => {
                self.limiter.acquire(ANIME_SOURCE_KEY).await;
                api::by_genre_id(&self.client, genre_id).await
            }
            Ok(None) => {
                self.limiter.acquire(ANIME_SOURCE_KEY).await;
                api::search(&self.client, genre).await
            }
            Err(e) => {
                warn!(error = %e, genre, "genre list unavailable, falling back to text search");
                self.limiter.acquire(ANIME_SOURCE_KEY).await;
                api::search(&self.client, genre).await
            }
        }
    }

    pub async fn details_by_id(&self, id: u64) -> Result<Option<CatalogSummary>, SourceError> {
        self.limiter.acquire(ANIME_SOURCE_KEY).await;
        api::details_by_id(&self.client, id).await
    }
}

#[async_trait]
impl CatalogSource for JikanClient {
    fn source_name(&self) -> &'static str {
        ANIME_SOURCE_KEY
    }

    async fn search(&self, query: &str) -> Result<Vec<CatalogSummary>, SourceError> {
        JikanClient::search(self, query).await
    }

    async fn fetch_details(&self, id: &str) -> Result<Option<CatalogSummary>, SourceError> {
        let numeric: u64 = match id.parse() {
            Ok(n) => n,
            Err(_) => return Err(SourceError::Parse(format!("invalid anime catalog id: {}", id))),
        };
        self.details_by_id(numeric).await
    }
}
