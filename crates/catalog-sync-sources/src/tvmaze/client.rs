use std::sync::Arc;

use async_trait::async_trait;
use catalog_sync_models::{CatalogSummary, Episode};
use reqwest::Client;

use crate::error::SourceError;
use crate::rate_limit::RateLimiter;
use crate::traits::CatalogSource;
use crate::tvmaze::api;

pub const SOURCE_KEY: &str = "tvmaze";

/// Episodic TV catalog. Unauthenticated, and not quota-constrained, but
/// every call still passes through the shared limiter so a spacing can be
/// configured without touching call sites.
#[derive(Clone)]
pub struct TvMazeClient {
    client: Client,
    limiter: Arc<RateLimiter>,
}

impl TvMazeClient {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self {
            client: Client::new(),
            limiter,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<CatalogSummary>, SourceError> {
        self.limiter.acquire(SOURCE_KEY).await;
        api::search(&self.client, query).await
    }

    pub async fn show_by_id(&self, id: u64) -> Result<Option<CatalogSummary>, SourceError> {
        self.limiter.acquire(SOURCE_KEY).await;
        api::show_by_id(&self.client, id).await
    }

    pub async fn episodes(&self, id: u64) -> Result<Vec<Episode>, SourceError> {
        self.limiter.acquire(SOURCE_KEY).await;
        api::episodes(&self.client, id).await
    }

    pub async fn lookup_by_imdb(&self, imdb_id: &str) -> Result<Option<CatalogSummary>, SourceError> {
        self.limiter.acquire(SOURCE_KEY).await;
        api::lookup_by_imdb(&self.client, imdb_id).await
    }

    pub async fn schedule_today(&self) -> Result<Vec<CatalogSummary>, SourceError> {
        self.limiter.acquire(SOURCE_KEY).await;
        api::schedule_today(&self.client).await
    }

    pub async fn popular_shows(&self) -> Result<Vec<CatalogSummary>, SourceError> {
        self.limiter.acquire(SOURCE_KEY).await;
        api::popular_shows(&self.client).await
    }

    pub async fn search_by_genre(&self, genre: &str) -> Result<Vec<CatalogSummary>, SourceError> {
        self.limiter.acquire(SOURCE_KEY).await;
        api::search_by_genre(&self.client, genre).await
    }
}

#[async_trait]
impl CatalogSource for TvMazeClient {
    fn source_name(&self) -> &'static str {
        SOURCE_KEY
    }

    async fn search(&self, query: &str) -> Result<Vec<CatalogSummary>, SourceError> {
        TvMazeClient::search(self, query).await
    }

    async fn fetch_details(&self, id: &str) -> Result<Option<CatalogSummary>, SourceError> {
        let numeric: u64 = match id.parse() {
            Ok(n) => n,
            Err(_) => return Err(SourceError::Parse(format!("invalid TV catalog id: {}", id))),
        };
        self.show_by_id(numeric).await
    }
}
