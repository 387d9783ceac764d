use std::collections::HashSet;
use std::sync::Arc;

use catalog_sync_models::{CatalogSummary, ContentType};
use catalog_sync_sources::{
    CatalogSource, JikanClient, RateLimiter, SourceError, TvMazeClient, WikidataClient,
};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cross_match;
use crate::refresh::compute_next_episode;

const TOP_AIRING_LIMIT: usize = 25;

#[derive(Debug, Error)]
pub enum AggregateError {
    /// Every catalog failed; there is nothing useful to show.
    #[error("Offline or catalog unavailable")]
    CatalogUnavailable,
}

/// Owns the three catalog clients, which share one rate limiter.
///
/// Aggregate operations degrade a single source's failure to an empty
/// contribution; only when every source fails does the operation itself
/// error, which the caller presents as one plain-text fallback message.
pub struct Aggregator {
    tvmaze: TvMazeClient,
    jikan: JikanClient,
    wikidata: WikidataClient,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::with_limiter(Arc::new(RateLimiter::new()))
    }

    pub fn with_limiter(limiter: Arc<RateLimiter>) -> Self {
        Self {
            tvmaze: TvMazeClient::new(limiter.clone()),
            jikan: JikanClient::new(limiter.clone()),
            wikidata: WikidataClient::new(limiter),
        }
    }

    pub fn tvmaze(&self) -> &TvMazeClient {
        &self.tvmaze
    }

    /// Search the TV and anime catalogs concurrently and interleave the
    /// results as they came back, TV first.
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogSummary>, AggregateError> {
        let (tv, anime) = tokio::join!(self.tvmaze.search(query), self.jikan.search(query));
        collect_sources(vec![("tvmaze", tv), ("anime", anime)]).map(dedupe_by_id)
    }

    /// Today's airing schedule: the TV catalog's schedule page plus the
    /// top currently-airing anime, each anime entry cross-matched for a
    /// real episode schedule. Unmatched anime entries are dropped.
    pub async fn airing(&self) -> Result<Vec<CatalogSummary>, AggregateError> {
        let now = Utc::now();
        let (tv, anime) = tokio::join!(
            self.tvmaze.schedule_today(),
            self.jikan.top_airing(TOP_AIRING_LIMIT)
        );
        let anime = match anime {
            Ok(summaries) => Ok(cross_match::attach_tv_schedule(&self.tvmaze, summaries, now).await),
            Err(e) => Err(e),
        };
        collect_sources(vec![("tvmaze", tv), ("anime", anime)]).map(dedupe_by_id)
    }

    /// Popular titles, optionally narrowed by genre. With a genre the
    /// knowledge-graph catalog contributes movies; non-TV entries are
    /// cross-matched and, when unmatched, dropped.
    pub async fn popular(&self, genre: Option<&str>) -> Result<Vec<CatalogSummary>, AggregateError> {
        let now = Utc::now();
        match genre {
            Some(genre) => {
                let (tv, anime, movies) = tokio::join!(
                    self.tvmaze.search_by_genre(genre),
                    self.jikan.by_genre(genre),
                    self.wikidata.query_by_genre(genre)
                );
                let anime = match anime {
                    Ok(summaries) => {
                        Ok(cross_match::attach_tv_schedule(&self.tvmaze, summaries, now).await)
                    }
                    Err(e) => Err(e),
                };
                let movies = match movies {
                    Ok(summaries) => {
                        Ok(cross_match::attach_tv_schedule(&self.tvmaze, summaries, now).await)
                    }
                    Err(e) => Err(e),
                };
                collect_sources(vec![("tvmaze", tv), ("anime", anime), ("wikidata", movies)])
                    .map(dedupe_by_id)
            }
            None => {
                let (tv, anime) = tokio::join!(
                    self.tvmaze.popular_shows(),
                    self.jikan.top_airing(TOP_AIRING_LIMIT)
                );
                let anime = match anime {
                    Ok(summaries) => {
                        Ok(cross_match::attach_tv_schedule(&self.tvmaze, summaries, now).await)
                    }
                    Err(e) => Err(e),
                };
                collect_sources(vec![("tvmaze", tv), ("anime", anime)]).map(dedupe_by_id)
            }
        }
    }

    /// Look up a summary by its namespaced id, dispatching to the
    /// catalog that owns the namespace. Movie entities have no details
    /// endpoint; their summaries are already complete.
    pub async fn fetch_details(&self, id: &str) -> Result<Option<CatalogSummary>, SourceError> {
        let (source, local): (&dyn CatalogSource, &str) = match id.split_once(':') {
            Some(("tv", local)) => (&self.tvmaze, local),
            Some(("mal", local)) => (&self.jikan, local),
            _ => return Ok(None),
        };
        source.fetch_details(local).await
    }

    /// Fully resolve one summary for tracking. The native record is
    /// re-fetched so tracking starts from the catalog's authoritative
    /// details rather than a search-result row; TV records then get
    /// their next episode computed from the episode list, and anime and
    /// movies are cross-matched for a schedule. An explicit add is not
    /// subject to the strict drop policy of the views: an unmatched
    /// summary resolves to the bare record.
    pub async fn resolve(&self, summary: &CatalogSummary) -> CatalogSummary {
        let now = Utc::now();

        let summary = match self.fetch_details(&summary.id).await {
            Ok(Some(details)) => details,
            Ok(None) => summary.clone(),
            Err(e) => {
                warn!(id = %summary.id, error = %e, "details unavailable, using the search row");
                summary.clone()
            }
        };

        if summary.content_type == ContentType::Tv {
            let mut resolved = summary;
            if let Some(tv_id) = resolved.tvmaze_id {
                match self.tvmaze.episodes(tv_id).await {
                    Ok(episodes) => resolved.next_episode = compute_next_episode(&episodes, now),
                    Err(e) => warn!(id = %resolved.id, error = %e, "episode list unavailable"),
                }
            }
            return resolved;
        }

        match cross_match::resolve_with_schedule(&self.tvmaze, &summary, now).await {
            Ok(Some(merged)) => merged,
            Ok(None) => {
                debug!(id = %summary.id, "no TV counterpart, tracking without a schedule");
                summary
            }
            Err(e) => {
                warn!(id = %summary.id, error = %e, "cross-match failed, tracking without a schedule");
                summary
            }
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold per-source results together. A failed source contributes nothing
/// and is logged; only when every source failed does the whole operation
/// report the catalogs unavailable.
fn collect_sources(
    results: Vec<(&'static str, Result<Vec<CatalogSummary>, SourceError>)>,
) -> Result<Vec<CatalogSummary>, AggregateError> {
    let total = results.len();
    let mut failures = 0usize;
    let mut combined = Vec::new();

    for (source, result) in results {
        match result {
            Ok(summaries) => combined.extend(summaries),
            Err(e) => {
                warn!(source, error = %e, "catalog unavailable, dropping its contribution");
                failures += 1;
            }
        }
    }

    if failures == total {
        return Err(AggregateError::CatalogUnavailable);
    }
    Ok(combined)
}

/// Keep the first occurrence of each id. A title can arrive from both
/// the TV schedule and a cross-matched anime entry.
fn dedupe_by_id(summaries: Vec<CatalogSummary>) -> Vec<CatalogSummary> {
    let mut seen = HashSet::new();
    summaries
        .into_iter()
        .filter(|summary| seen.insert(summary.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str) -> CatalogSummary {
        CatalogSummary::new(id, "Test", ContentType::Tv)
    }

    fn unavailable() -> SourceError {
        SourceError::Parse("boom".to_string())
    }

    #[test]
    fn one_failed_source_degrades_to_its_absence() {
        let combined = collect_sources(vec![
            ("tvmaze", Ok(vec![summary("tv:1")])),
            ("anime", Err(unavailable())),
        ])
        .unwrap();
        assert_eq!(combined.len(), 1);
    }

    #[test]
    fn all_failed_sources_surface_one_fallback_error() {
        let result = collect_sources(vec![
            ("tvmaze", Err(unavailable())),
            ("anime", Err(unavailable())),
        ]);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Offline or catalog unavailable");
    }

    #[test]
    fn an_empty_but_healthy_source_is_not_a_failure() {
        let combined = collect_sources(vec![
            ("tvmaze", Ok(Vec::new())),
            ("anime", Err(unavailable())),
        ])
        .unwrap();
        assert!(combined.is_empty());
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let deduped = dedupe_by_id(vec![summary("tv:1"), summary("mal:2"), summary("tv:1")]);
        let ids: Vec<&str> = deduped.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["tv:1", "mal:2"]);
    }
}
