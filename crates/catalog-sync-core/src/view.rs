use catalog_sync_models::{parse_timestamp, Show, SortMode};
use chrono::{DateTime, Utc};

fn airstamp_key(show: &Show) -> DateTime<Utc> {
    show.next_episode
        .as_ref()
        .and_then(|next| parse_timestamp(&next.airstamp))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Stable sort of the tracked collection. Pinned shows always precede
/// non-pinned ones, regardless of mode; within each partition `Soonest`
/// orders by ascending next-episode airstamp (absent or unparsable sorts
/// last) and `Alpha` by case-folded name.
pub fn sort_shows(shows: &mut [Show], mode: SortMode) {
    match mode {
        SortMode::Alpha => shows.sort_by_key(|show| (!show.priority, show.name.to_lowercase())),
        SortMode::Soonest => shows.sort_by_key(|show| (!show.priority, airstamp_key(show))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Show>,
    pub has_more: bool,
}

/// Cumulative reveal: the first `page * page_size` items. Increasing `page`
/// strictly extends the visible prefix; this is not a windowed slice.
pub fn paginate(shows: &[Show], page: usize, page_size: usize) -> Page {
    let visible = page.saturating_mul(page_size).min(shows.len());
    Page {
        items: shows[..visible].to_vec(),
        has_more: visible < shows.len(),
    }
}

/// Case-insensitive status filter. `all` (or blank) passes everything;
/// anything else matches as a substring of the record's status.
pub fn filter_by_status(shows: Vec<Show>, filter: &str) -> Vec<Show> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() || needle == "all" {
        return shows;
    }
    shows
        .into_iter()
        .filter(|show| {
            show.status
                .as_deref()
                .map(|status| status.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}
