use catalog_sync_core::{export_shows, import_merge, import_replace, parse_export, TrackedStore};
use chrono::Utc;
use color_eyre::Result;
use std::path::Path;

use crate::commands::load_environment;
use crate::output::Output;

pub fn run_export(path: &Path, output: &Output) -> Result<()> {
    let env = load_environment()?;
    let store = TrackedStore::new(&env.paths);
    let shows = store.load();
    if shows.is_empty() {
        output.warn("Nothing to export.");
        return Ok(());
    }

    let file = export_shows(&shows, Utc::now());
    std::fs::write(path, serde_json::to_string_pretty(&file)?)?;
    output.success(format!(
        "Exported {} shows to {}",
        file.shows.len(),
        path.display()
    ));
    Ok(())
}

pub fn run_import(path: &Path, replace: bool, output: &Output) -> Result<()> {
    let env = load_environment()?;
    let content = std::fs::read_to_string(path)?;
    let file = match parse_export(&content) {
        Ok(file) => file,
        Err(e) => {
            output.error(format!("Import rejected: {}", e));
            return Ok(());
        }
    };

    let store = TrackedStore::new(&env.paths);
    if replace {
        let shows = import_replace(file.shows);
        store.save(&shows).map_err(|e| color_eyre::eyre::eyre!(e))?;
        output.success(format!("Replaced collection with {} shows", shows.len()));
    } else {
        let outcome = import_merge(store.load(), file.shows);
        store.save(&outcome.shows).map_err(|e| color_eyre::eyre::eyre!(e))?;
        output.success(format!(
            "Imported {} shows, skipped {} already tracked",
            outcome.added, outcome.skipped
        ));
    }
    Ok(())
}
