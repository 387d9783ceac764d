use catalog_sync_models::{CatalogSummary, ContentType, Show};
use chrono::{DateTime, Utc};

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Combine a primary fragment with fallback fragments into one record.
///
/// Identity fields (`id`, `name`, `content_type`) always come from the
/// primary. Every other field keeps the primary's value when it is
/// non-empty and otherwise takes the first secondary that has one, the
/// same fill-only-when-missing walk for each field. The next episode comes
/// from whichever fragment actually computed it; movies never carry one.
pub fn merge_fragments(primary: &CatalogSummary, secondaries: &[&CatalogSummary]) -> CatalogSummary {
    let mut merged = primary.clone();
    for other in secondaries {
        if merged.genres.is_empty() {
            merged.genres = other.genres.clone();
        }
        if merged.summary.trim().is_empty() {
            merged.summary = other.summary.clone();
        }
        if is_blank(&merged.status) {
            merged.status = other.status.clone();
        }
        if is_blank(&merged.image) {
            merged.image = other.image.clone();
        }
        if is_blank(&merged.imdb_id) {
            merged.imdb_id = other.imdb_id.clone();
        }
        if merged.tvmaze_id.is_none() {
            merged.tvmaze_id = other.tvmaze_id;
        }
        if is_blank(&merged.original_name) {
            merged.original_name = other.original_name.clone();
        }
        if merged.popularity.is_none() {
            merged.popularity = other.popularity;
        }
        if merged.next_episode.is_none() {
            merged.next_episode = other.next_episode.clone();
        }
    }
    if merged.content_type == ContentType::Movie {
        merged.next_episode = None;
    }
    merged
}

/// Rebuild a tracked show from a freshly merged fragment, stamping the
/// fetch time and reattaching the user-owned fields from the previous
/// record verbatim, overwriting anything the fetch path produced for them.
pub fn refreshed_show(previous: &Show, fragment: &CatalogSummary, fetched_at: DateTime<Utc>) -> Show {
    let mut show = Show::from_summary(fragment);
    show.last_fetched_at = Some(fetched_at.to_rfc3339());
    show.priority = previous.priority;
    show.watch_link = previous.watch_link.clone();
    show.watched = previous.watched;
    show.watched_at = previous.watched_at;
    show
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_sync_models::NextEpisode;

    fn anime_fragment() -> CatalogSummary {
        let mut summary = CatalogSummary::new("mal:100", "Frieren", ContentType::Anime);
        summary.summary = "An elf outlives her party.".to_string();
        summary.genres = vec!["Fantasy".to_string()];
        summary
    }

    fn tv_fragment() -> CatalogSummary {
        let mut summary = CatalogSummary::new("tv:500", "Frieren", ContentType::Tv);
        summary.tvmaze_id = Some(500);
        summary.status = Some("Running".to_string());
        summary.image = Some("http://img/frieren.jpg".to_string());
        summary.genres = vec!["Anime".to_string(), "Fantasy".to_string()];
        summary.next_episode = Some(NextEpisode {
            season: 2,
            number: 3,
            airstamp: "2026-08-08T15:00:00+00:00".to_string(),
        });
        summary
    }

    #[test]
    fn primary_wins_when_present() {
        let primary = anime_fragment();
        let secondary = tv_fragment();
        let merged = merge_fragments(&primary, &[&secondary]);
        assert_eq!(merged.id, "mal:100");
        assert_eq!(merged.content_type, ContentType::Anime);
        assert_eq!(merged.genres, vec!["Fantasy".to_string()]);
        assert_eq!(merged.summary, "An elf outlives her party.");
    }

    #[test]
    fn secondary_fills_missing_fields() {
        let primary = anime_fragment();
        let secondary = tv_fragment();
        let merged = merge_fragments(&primary, &[&secondary]);
        assert_eq!(merged.status.as_deref(), Some("Running"));
        assert_eq!(merged.image.as_deref(), Some("http://img/frieren.jpg"));
        assert_eq!(merged.tvmaze_id, Some(500));
        assert!(merged.next_episode.is_some());
    }

    #[test]
    fn movies_never_carry_a_next_episode() {
        let mut primary = CatalogSummary::new("wd:Q1", "Blade Runner", ContentType::Movie);
        primary.imdb_id = Some("tt0083658".to_string());
        let secondary = tv_fragment();
        let merged = merge_fragments(&primary, &[&secondary]);
        assert!(merged.next_episode.is_none());
    }

    #[test]
    fn merging_a_show_with_itself_is_idempotent() {
        let secondary = tv_fragment();
        let merged = merge_fragments(&anime_fragment(), &[&secondary]);
        let show = Show::from_summary(&merged);
        let fragment = show.fragment();
        let remerged = merge_fragments(&fragment, &[&fragment]);
        assert_eq!(Show::from_summary(&remerged), show);
    }

    #[test]
    fn refreshed_show_preserves_user_fields() {
        let fragment = tv_fragment();
        let mut previous = Show::from_summary(&fragment);
        previous.priority = true;
        previous.watched = true;
        previous.watch_link = Some("http://example.com/watch".to_string());
        previous.watched_at = Some("2026-07-01T00:00:00Z".parse().unwrap());

        let now: DateTime<Utc> = "2026-08-04T12:00:00Z".parse().unwrap();
        let refreshed = refreshed_show(&previous, &fragment, now);
        assert!(refreshed.priority);
        assert!(refreshed.watched);
        assert_eq!(refreshed.watch_link, previous.watch_link);
        assert_eq!(refreshed.watched_at, previous.watched_at);
        assert_eq!(refreshed.last_fetched_at.as_deref(), Some("2026-08-04T12:00:00+00:00"));
    }
}
