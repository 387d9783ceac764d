use catalog_sync_core::{countdown_info, AggregateError, CountdownMode};
use catalog_sync_models::CatalogSummary;
use chrono::Utc;
use color_eyre::Result;

use crate::commands::{build_aggregator, load_environment};
use crate::output::{Output, OutputFormat};

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let env = load_environment()?;
    let aggregator = build_aggregator(&env.config);

    match aggregator.search(query).await {
        Ok(summaries) if summaries.is_empty() => output.info("No results."),
        Ok(summaries) => print_summaries(&summaries, output),
        Err(AggregateError::CatalogUnavailable) => {
            output.error("Offline or catalog unavailable");
        }
    }
    Ok(())
}

pub async fn run_airing(output: &Output) -> Result<()> {
    let env = load_environment()?;
    let aggregator = build_aggregator(&env.config);
    remember_view(&env, "airing");

    match aggregator.airing().await {
        Ok(summaries) if summaries.is_empty() => output.info("Nothing airing today."),
        Ok(summaries) => print_summaries(&summaries, output),
        Err(AggregateError::CatalogUnavailable) => {
            output.error("Offline or catalog unavailable");
        }
    }
    Ok(())
}

pub async fn run_popular(genre: Option<&str>, output: &Output) -> Result<()> {
    let env = load_environment()?;
    let aggregator = build_aggregator(&env.config);
    remember_view(&env, "popular");

    match aggregator.popular(genre).await {
        Ok(summaries) if summaries.is_empty() => output.info("No popular titles found."),
        Ok(summaries) => print_summaries(&summaries, output),
        Err(AggregateError::CatalogUnavailable) => {
            output.error("Offline or catalog unavailable");
        }
    }
    Ok(())
}

/// Numbered so `add --pick n` can refer to a search result by position.
pub(crate) fn print_summaries(summaries: &[CatalogSummary], output: &Output) {
    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(summaries).unwrap_or_default());
        return;
    }

    let now = Utc::now();
    for (index, summary) in summaries.iter().enumerate() {
        let schedule = summary
            .next_episode
            .as_ref()
            .map(|next| {
                let info = countdown_info(Some(next.airstamp.as_str()), now);
                match info.mode {
                    CountdownMode::Upcoming => {
                        format!(" · S{:02}E{:02} in {}", next.season, next.number, info.label)
                    }
                    _ => format!(" · {}", info.label),
                }
            })
            .unwrap_or_default();
        let status = summary
            .status
            .as_deref()
            .map(|s| format!(" · {}", s))
            .unwrap_or_default();

        output.info(format!(
            "{:2}. {} [{}] ({}){}{}",
            index + 1,
            summary.name,
            summary.content_type.as_str(),
            summary.id,
            status,
            schedule,
        ));
    }
}

fn remember_view(env: &super::Environment, view: &str) {
    let path = env.paths.preferences_file();
    if let Ok(mut preferences) = catalog_sync_config::Preferences::load(&path) {
        preferences.current_view = view.to_string();
        if let Err(e) = preferences.save(&path) {
            tracing::debug!(error = %e, "could not persist current view");
        }
    }
}
