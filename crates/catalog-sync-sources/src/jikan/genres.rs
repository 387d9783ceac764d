use reqwest::Client;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::SourceError;
use crate::jikan::api::{self, JikanGenre};
use crate::rate_limit::{RateLimiter, ANIME_SOURCE_KEY};

/// Genre name → id mapping for the anime catalog, fetched once per process
/// and owned by the client rather than hidden in module state.
pub struct GenreCache {
    entries: Mutex<Option<Vec<JikanGenre>>>,
}

impl GenreCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(None),
        }
    }

    /// Resolve a genre name to its catalog id, filling the cache on first
    /// use. `Ok(None)` means the name is not a known genre; callers fall
    /// back to free-text search.
    pub async fn resolve(
        &self,
        client: &Client,
        limiter: &RateLimiter,
        name: &str,
    ) -> Result<Option<u64>, SourceError> {
        let mut guard = self.entries.lock().await;
        if guard.is_none() {
            limiter.acquire(ANIME_SOURCE_KEY).await;
            let fetched = api::genre_list(client).await?;
            debug!(count = fetched.len(), "cached anime genre list");
            *guard = Some(fetched);
        }
        Ok(guard
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
            .map(|g| g.mal_id))
    }
}

impl Default for GenreCache {
    fn default() -> Self {
        Self::new()
    }
}
