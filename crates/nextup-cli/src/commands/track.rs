use catalog_sync_core::TrackedStore;
use catalog_sync_models::Show;
use chrono::Utc;
use color_eyre::Result;

use crate::commands::{build_aggregator, load_environment};
use crate::output::Output;

pub async fn run_add(query: &str, pick: usize, output: &Output) -> Result<()> {
    let env = load_environment()?;
    let aggregator = build_aggregator(&env.config);

    let summaries = match aggregator.search(query).await {
        Ok(summaries) => summaries,
        Err(e) => {
            output.error(e.to_string());
            return Ok(());
        }
    };
    if summaries.is_empty() {
        output.info("No results.");
        return Ok(());
    }
    let Some(summary) = summaries.get(pick.saturating_sub(1)) else {
        output.error(format!(
            "--pick {} is out of range, search returned {} results",
            pick,
            summaries.len()
        ));
        return Ok(());
    };

    let store = TrackedStore::new(&env.paths);
    let mut shows = store.load();
    if shows.iter().any(|show| show.id == summary.id) {
        output.warn(format!("{} is already tracked", summary.id));
        return Ok(());
    }

    let resolved = aggregator.resolve(summary).await;
    let mut show = Show::from_summary(&resolved);
    show.last_fetched_at = Some(Utc::now().to_rfc3339());

    output.success(format!("Tracking {} ({})", show.name, show.id));
    if show.next_episode.is_none() && show.content_type != catalog_sync_models::ContentType::Movie {
        output.info("No upcoming episode schedule was found for this title.");
    }

    shows.push(show);
    store.save(&shows).map_err(|e| color_eyre::eyre::eyre!(e))?;
    Ok(())
}

pub fn run_pin(id: &str, pinned: bool, output: &Output) -> Result<()> {
    edit_show(id, output, |show| {
        show.priority = pinned;
        if pinned {
            format!("Pinned {}", show.name)
        } else {
            format!("Unpinned {}", show.name)
        }
    })
}

pub fn run_watched(id: &str, output: &Output) -> Result<()> {
    edit_show(id, output, |show| {
        show.watched = true;
        show.watched_at = Some(Utc::now());
        format!("Marked {} as watched", show.name)
    })
}

pub fn run_link(id: &str, url: &str, output: &Output) -> Result<()> {
    edit_show(id, output, |show| {
        show.watch_link = Some(url.to_string());
        format!("Linked {} to {}", show.name, url)
    })
}

pub fn run_remove(id: &str, output: &Output) -> Result<()> {
    let env = load_environment()?;
    let store = TrackedStore::new(&env.paths);
    let mut shows = store.load();

    let before = shows.len();
    shows.retain(|show| show.id != id);
    if shows.len() == before {
        output.error(format!("Not tracked: {}", id));
        return Ok(());
    }
    store.save(&shows).map_err(|e| color_eyre::eyre::eyre!(e))?;
    output.success(format!("Removed {}", id));
    Ok(())
}

/// Read-modify-write of a single record by id; the whole collection is
/// written back, matching the store's contract.
fn edit_show(id: &str, output: &Output, edit: impl FnOnce(&mut Show) -> String) -> Result<()> {
    let env = load_environment()?;
    let store = TrackedStore::new(&env.paths);
    let mut shows = store.load();

    let Some(show) = shows.iter_mut().find(|show| show.id == id) else {
        output.error(format!("Not tracked: {}", id));
        return Ok(());
    };
    let message = edit(show);
    store.save(&shows).map_err(|e| color_eyre::eyre::eyre!(e))?;
    output.success(message);
    Ok(())
}
