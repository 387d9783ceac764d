use catalog_sync_config::Preferences;
use catalog_sync_core::{countdown_info, filter_by_status, paginate, sort_shows, CountdownMode, TrackedStore};
use catalog_sync_models::{Show, SortMode};
use chrono::Utc;
use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::commands::load_environment;
use crate::output::{Output, OutputFormat};

pub fn run_list(
    sort: Option<String>,
    page: usize,
    page_size: Option<usize>,
    status: Option<String>,
    output: &Output,
) -> Result<()> {
    let env = load_environment()?;
    let preferences_path = env.paths.preferences_file();
    let mut preferences = Preferences::load(&preferences_path).map_err(|e| color_eyre::eyre::eyre!(e))?;

    // Flags override the stored preferences and become the new defaults
    if let Some(raw) = sort {
        preferences.sort_mode = raw.parse::<SortMode>().map_err(|e| eyre!(e))?;
    }
    if let Some(status) = status {
        preferences.status_filter = status;
    }
    preferences.current_view = "list".to_string();
    if let Err(e) = preferences.save(&preferences_path) {
        tracing::debug!(error = %e, "could not persist preferences");
    }

    let store = TrackedStore::new(&env.paths);
    let shows = store.load();
    if shows.is_empty() {
        output.info("No tracked shows. Use `nextup add <query>` to start.");
        return Ok(());
    }

    let total = shows.len();
    let mut shows = filter_by_status(shows, &preferences.status_filter);
    sort_shows(&mut shows, preferences.sort_mode);

    let page_size = page_size.unwrap_or(env.config.sources.page_size);
    let view = paginate(&shows, page.max(1), page_size);

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(&view.items).unwrap_or_default());
        return Ok(());
    }

    let now = Utc::now();
    for show in &view.items {
        output.info(format_line(show, now));
    }
    if view.has_more {
        output.info(format!(
            "... {} of {} shown, use --page {} for more",
            view.items.len(),
            shows.len(),
            page + 1,
        ));
    }
    if shows.len() < total {
        output.info(format!(
            "({} hidden by status filter '{}')",
            total - shows.len(),
            preferences.status_filter,
        ));
    }
    Ok(())
}

fn format_line(show: &Show, now: chrono::DateTime<Utc>) -> String {
    let pin = if show.priority { "★ " } else { "  " };
    let airstamp = show.next_episode.as_ref().map(|next| next.airstamp.as_str());
    let info = countdown_info(airstamp, now);
    let schedule = match (info.mode, show.next_episode.as_ref()) {
        (CountdownMode::Upcoming, Some(next)) => {
            format!("S{:02}E{:02} in {}", next.season, next.number, info.label)
        }
        _ => info.label,
    };
    let watched = if show.watched { " · watched" } else { "" };
    format!("{}{} ({}) · {}{}", pin, show.name, show.id, schedule, watched)
}
