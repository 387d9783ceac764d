use std::sync::Arc;

use catalog_sync_models::CatalogSummary;
use reqwest::Client;

use crate::error::SourceError;
use crate::rate_limit::RateLimiter;
use crate::wikidata::api;

pub const SOURCE_KEY: &str = "wikidata";

const DEFAULT_LIMIT: usize = 20;

/// Knowledge-graph catalog, used for the movie content type the other two
/// catalogs do not cover. Genre browse only.
#[derive(Clone)]
pub struct WikidataClient {
    client: Client,
    limiter: Arc<RateLimiter>,
}

impl WikidataClient {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self {
            client: Client::new(),
            limiter,
        }
    }

    pub async fn query_by_genre(&self, genre: &str) -> Result<Vec<CatalogSummary>, SourceError> {
        self.limiter.acquire(SOURCE_KEY).await;
        api::query_by_genre(&self.client, genre, DEFAULT_LIMIT).await
    }
}
