use catalog_sync_models::{parse_timestamp, ContentType, Episode, NextEpisode, Show};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::cross_match::TvCatalog;
use crate::merge;

/// Age of a per-show fetch beyond which a refresh is required.
pub const STALENESS_HOURS: i64 = 24;

/// A record is stale when it has never been fetched, carries an unparsable
/// fetch timestamp, or was last fetched more than the staleness window ago.
pub fn is_stale(last_fetched_at: Option<&str>, now: DateTime<Utc>) -> bool {
    match last_fetched_at.and_then(parse_timestamp) {
        Some(fetched_at) => now - fetched_at > Duration::hours(STALENESS_HOURS),
        None => true,
    }
}

/// Select the episode with the smallest future airstamp. Single pass;
/// entries without a parsable airstamp, or already aired, are ignored.
pub fn compute_next_episode(episodes: &[Episode], now: DateTime<Utc>) -> Option<NextEpisode> {
    let mut best: Option<(DateTime<Utc>, NextEpisode)> = None;
    for episode in episodes {
        let Some(raw) = episode.airstamp.as_deref() else {
            continue;
        };
        let Some(air) = parse_timestamp(raw) else {
            continue;
        };
        if air <= now {
            continue;
        }
        if best.as_ref().map_or(true, |(current, _)| air < *current) {
            best = Some((
                air,
                NextEpisode {
                    season: episode.season,
                    number: episode.number,
                    airstamp: raw.to_string(),
                },
            ));
        }
    }
    best.map(|(_, next)| next)
}

fn tv_catalog_id(show: &Show) -> Option<u64> {
    show.tvmaze_id
        .or_else(|| show.id.strip_prefix("tv:").and_then(|n| n.parse().ok()))
}

/// Walk the tracked collection and re-fetch whatever is stale.
///
/// Iteration is sequential on purpose: at most one re-fetch is in flight,
/// bounding burst load on the TV catalog. A per-item failure keeps the
/// previous record and the loop moves on.
pub async fn refresh_all<C: TvCatalog + ?Sized>(
    tvmaze: &C,
    shows: Vec<Show>,
    now: DateTime<Utc>,
) -> Vec<Show> {
    refresh_all_with(tvmaze, shows, now, |_| {}).await
}

/// `refresh_all` with a per-item hook, invoked after each show is
/// processed. The CLI drives its progress bar from it.
pub async fn refresh_all_with<C, F>(
    tvmaze: &C,
    shows: Vec<Show>,
    now: DateTime<Utc>,
    mut on_item: F,
) -> Vec<Show>
where
    C: TvCatalog + ?Sized,
    F: FnMut(&Show),
{
    let mut refreshed = Vec::with_capacity(shows.len());
    let mut updated = 0usize;
    let mut retained = 0usize;

    for show in shows {
        on_item(&show);
        if !is_stale(show.last_fetched_at.as_deref(), now) {
            refreshed.push(show);
            continue;
        }

        if show.content_type == ContentType::Movie {
            // No episode list to fetch; stamp the record so it stops
            // re-triggering until the next window.
            let mut show = show;
            show.last_fetched_at = Some(now.to_rfc3339());
            refreshed.push(show);
            continue;
        }

        let Some(tv_id) = tv_catalog_id(&show) else {
            debug!(id = %show.id, "no TV catalog linkage, keeping record as-is");
            refreshed.push(show);
            continue;
        };

        match tvmaze.episodes(tv_id).await {
            Ok(episodes) => {
                let mut fragment = show.fragment();
                fragment.next_episode = compute_next_episode(&episodes, now);
                refreshed.push(merge::refreshed_show(&show, &fragment, now));
                updated += 1;
            }
            Err(e) => {
                warn!(id = %show.id, error = %e, "refresh failed, keeping previous record");
                refreshed.push(show);
                retained += 1;
            }
        }
    }

    info!(updated, retained, total = refreshed.len(), "refresh pass complete");
    refreshed
}
