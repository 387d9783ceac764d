use std::sync::Arc;

use catalog_sync_core::{refresh_all, Aggregator, TrackedStore, ViewGeneration};
use chrono::Utc;
use color_eyre::Result;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::commands::{build_aggregator, load_environment};
use crate::output::Output;

/// Foreground daemon driving the staleness-gated refresh on a cron
/// schedule. Process supervision (restarts, backgrounding) is left to
/// the host, e.g. systemd or the container runtime.
pub async fn run_daemon(
    schedule: Option<String>,
    no_startup_refresh: bool,
    output: &Output,
) -> Result<()> {
    let env = load_environment()?;
    let schedule = schedule.unwrap_or_else(|| env.config.scheduler.schedule.clone());

    let aggregator = Arc::new(build_aggregator(&env.config));
    let store = Arc::new(TrackedStore::new(&env.paths));
    let generation = Arc::new(ViewGeneration::new());

    if env.config.scheduler.run_on_startup && !no_startup_refresh {
        info!("running initial refresh on startup");
        refresh_tick(&aggregator, &store, &generation).await;
    }

    let scheduler = JobScheduler::new().await?;
    let job = {
        let aggregator = aggregator.clone();
        let store = store.clone();
        let generation = generation.clone();
        Job::new_async(schedule.as_str(), move |_uuid, _lock| {
            let aggregator = aggregator.clone();
            let store = store.clone();
            let generation = generation.clone();
            Box::pin(async move {
                refresh_tick(&aggregator, &store, &generation).await;
            })
        })?
    };
    scheduler.add(job).await?;
    scheduler.start().await?;

    output.info(format!("Daemon running, schedule: {}", schedule));
    info!(schedule, "daemon started");

    loop {
        tokio::time::sleep(tokio::time::Duration::from_secs(3600)).await;
    }
}

/// One scheduled pass. The generation guard keeps an overlapping tick (a
/// slow catalog can outlast the interval) from overwriting a newer
/// pass's results with stale ones.
async fn refresh_tick(aggregator: &Aggregator, store: &TrackedStore, generation: &ViewGeneration) {
    let ticket = generation.bump();

    let shows = store.load();
    if shows.is_empty() {
        info!("no tracked shows, skipping refresh");
        return;
    }
    let total = shows.len();

    let refreshed = refresh_all(aggregator.tvmaze(), shows, Utc::now()).await;

    if !generation.is_current(ticket) {
        info!("refresh pass superseded by a newer one, discarding results");
        return;
    }
    match store.save(&refreshed) {
        Ok(()) => info!(total, "scheduled refresh complete"),
        Err(e) => error!(error = %e, "failed to persist refreshed collection"),
    }
}
