use async_trait::async_trait;
use catalog_sync_models::{CatalogSummary, Episode};
use catalog_sync_sources::{SourceError, TvMazeClient};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::merge::merge_fragments;
use crate::refresh::compute_next_episode;

/// The slice of the TV catalog the identity matcher and the refresh path
/// depend on. `TvMazeClient` is the production implementation; tests
/// substitute a canned catalog.
#[async_trait]
pub trait TvCatalog: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<CatalogSummary>, SourceError>;
    async fn lookup_by_imdb(&self, imdb_id: &str) -> Result<Option<CatalogSummary>, SourceError>;
    async fn episodes(&self, tvmaze_id: u64) -> Result<Vec<Episode>, SourceError>;
}

#[async_trait]
impl TvCatalog for TvMazeClient {
    async fn search(&self, query: &str) -> Result<Vec<CatalogSummary>, SourceError> {
        TvMazeClient::search(self, query).await
    }

    async fn lookup_by_imdb(&self, imdb_id: &str) -> Result<Option<CatalogSummary>, SourceError> {
        TvMazeClient::lookup_by_imdb(self, imdb_id).await
    }

    async fn episodes(&self, tvmaze_id: u64) -> Result<Vec<Episode>, SourceError> {
        TvMazeClient::episodes(self, tvmaze_id).await
    }
}

/// Find the TV-catalog record describing the same title as a non-TV
/// summary. First success wins: lookup by external id, then search by the
/// localized title, then by the original title when it differs. `Ok(None)`
/// is the normal no-match outcome, not an error.
pub async fn find_tv_counterpart<C: TvCatalog + ?Sized>(
    tvmaze: &C,
    summary: &CatalogSummary,
) -> Result<Option<CatalogSummary>, SourceError> {
    if let Some(imdb_id) = summary.imdb_id.as_deref() {
        if let Some(found) = tvmaze.lookup_by_imdb(imdb_id).await? {
            debug!(id = %summary.id, imdb_id, "matched by external id");
            return Ok(Some(found));
        }
    }

    if let Some(found) = search_exact(tvmaze, &summary.name).await? {
        return Ok(Some(found));
    }

    if let Some(original) = summary.original_name.as_deref() {
        if !original.eq_ignore_ascii_case(&summary.name) {
            if let Some(found) = search_exact(tvmaze, original).await? {
                return Ok(Some(found));
            }
        }
    }

    Ok(None)
}

async fn search_exact<C: TvCatalog + ?Sized>(
    tvmaze: &C,
    title: &str,
) -> Result<Option<CatalogSummary>, SourceError> {
    let results = tvmaze.search(title).await?;
    Ok(results
        .into_iter()
        .find(|candidate| candidate.name.eq_ignore_ascii_case(title)))
}

/// Resolve one non-TV summary against the TV catalog: find its
/// counterpart, compute the counterpart's upcoming episode from its
/// episode list, and merge the pair with the native record as primary.
pub async fn resolve_with_schedule<C: TvCatalog + ?Sized>(
    tvmaze: &C,
    summary: &CatalogSummary,
    now: DateTime<Utc>,
) -> Result<Option<CatalogSummary>, SourceError> {
    let Some(mut counterpart) = find_tv_counterpart(tvmaze, summary).await? else {
        return Ok(None);
    };

    if let Some(tv_id) = counterpart.tvmaze_id {
        let episodes = tvmaze.episodes(tv_id).await?;
        counterpart.next_episode = compute_next_episode(&episodes, now);
    }

    Ok(Some(merge_fragments(summary, &[&counterpart])))
}

/// Cross-match a batch of non-TV summaries concurrently. Entries with no
/// TV counterpart, or whose lookup fails, are dropped from the result:
/// the schedule-bearing views only carry titles with a recovered episode
/// schedule. Each lookup is individually rate-limited by the shared
/// limiter.
pub async fn attach_tv_schedule<C: TvCatalog + ?Sized>(
    tvmaze: &C,
    summaries: Vec<CatalogSummary>,
    now: DateTime<Utc>,
) -> Vec<CatalogSummary> {
    let lookups = summaries
        .iter()
        .map(|summary| resolve_with_schedule(tvmaze, summary, now));
    let results = join_all(lookups).await;

    let mut matched = Vec::with_capacity(summaries.len());
    for (summary, result) in summaries.iter().zip(results) {
        match result {
            Ok(Some(merged)) => matched.push(merged),
            Ok(None) => {
                debug!(id = %summary.id, name = %summary.name, "no TV counterpart, dropped");
            }
            Err(e) => {
                warn!(id = %summary.id, error = %e, "cross-match failed, dropped");
            }
        }
    }
    matched
}
