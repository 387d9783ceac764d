use catalog_sync_core::{refresh_all_with, TrackedStore};
use chrono::Utc;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::commands::{build_aggregator, load_environment};
use crate::output::Output;

pub async fn run_refresh(output: &Output) -> Result<()> {
    let env = load_environment()?;
    let store = TrackedStore::new(&env.paths);
    let shows = store.load();
    if shows.is_empty() {
        output.info("No tracked shows.");
        return Ok(());
    }

    let aggregator = build_aggregator(&env.config);

    let bar = ProgressBar::new(shows.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );

    let refreshed = refresh_all_with(aggregator.tvmaze(), shows, Utc::now(), |show| {
        bar.set_message(show.name.clone());
        bar.inc(1);
    })
    .await;
    bar.finish_and_clear();

    store.save(&refreshed).map_err(|e| color_eyre::eyre::eyre!(e))?;
    output.success(format!("Refreshed {} tracked shows", refreshed.len()));
    Ok(())
}
