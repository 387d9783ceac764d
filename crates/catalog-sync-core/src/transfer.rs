use catalog_sync_models::Show;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

pub const EXPORT_VERSION: &str = "1.0";

/// On-disk exchange format for a tracked collection.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub version: String,
    pub exported_at: String,
    pub shows: Vec<Show>,
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("not a valid export file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("export file contains no shows")]
    Empty,
}

/// Outcome of a merge import, for caller-side reporting.
#[derive(Debug)]
pub struct ImportOutcome {
    pub shows: Vec<Show>,
    pub added: usize,
    pub skipped: usize,
}

pub fn export_shows(shows: &[Show], now: DateTime<Utc>) -> ExportFile {
    ExportFile {
        version: EXPORT_VERSION.to_string(),
        exported_at: now.to_rfc3339(),
        shows: shows.to_vec(),
    }
}

/// Decode and validate an export document. A file without a non-empty
/// `shows` array is rejected before it can touch the collection.
pub fn parse_export(json: &str) -> Result<ExportFile, TransferError> {
    let file: ExportFile = serde_json::from_str(json)?;
    if file.shows.is_empty() {
        return Err(TransferError::Empty);
    }
    Ok(file)
}

/// Merge an imported collection into the current one. Imported shows
/// whose id is already tracked are dropped; the current records win.
pub fn import_merge(current: Vec<Show>, incoming: Vec<Show>) -> ImportOutcome {
    let existing: HashSet<String> = current.iter().map(|show| show.id.clone()).collect();
    let mut shows = current;
    let mut added = 0usize;
    let mut skipped = 0usize;

    for show in incoming {
        if existing.contains(&show.id) {
            debug!(id = %show.id, "already tracked, skipping imported record");
            skipped += 1;
            continue;
        }
        shows.push(show);
        added += 1;
    }

    ImportOutcome { shows, added, skipped }
}

/// Replace the current collection wholesale.
pub fn import_replace(incoming: Vec<Show>) -> Vec<Show> {
    incoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_sync_models::{CatalogSummary, ContentType};

    fn show(id: &str) -> Show {
        Show::from_summary(&CatalogSummary::new(id, "Test", ContentType::Tv))
    }

    #[test]
    fn export_round_trips_through_json() {
        let now: DateTime<Utc> = "2026-08-04T12:00:00Z".parse().unwrap();
        let file = export_shows(&[show("tv:1")], now);
        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains("\"exportedAt\""));

        let parsed = parse_export(&json).unwrap();
        assert_eq!(parsed.version, EXPORT_VERSION);
        assert_eq!(parsed.shows.len(), 1);
        assert_eq!(parsed.shows[0].id, "tv:1");
    }

    #[test]
    fn empty_export_is_rejected() {
        let json = r#"{"version": "1.0", "exportedAt": "2026-08-04T12:00:00Z", "shows": []}"#;
        assert!(matches!(parse_export(json), Err(TransferError::Empty)));
    }

    #[test]
    fn malformed_export_is_rejected() {
        assert!(matches!(parse_export("{"), Err(TransferError::Parse(_))));
        assert!(matches!(
            parse_export(r#"{"version": "1.0"}"#),
            Err(TransferError::Parse(_))
        ));
    }

    #[test]
    fn merge_import_drops_duplicate_ids() {
        let current = vec![show("tv:1")];
        let incoming = vec![show("tv:1"), show("mal:2")];

        let outcome = import_merge(current, incoming);
        assert_eq!(outcome.shows.len(), 2);
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.skipped, 1);
        let ids: Vec<&str> = outcome.shows.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["tv:1", "mal:2"]);
    }

    #[test]
    fn merge_import_keeps_the_current_record_on_conflict() {
        let mut tracked = show("tv:1");
        tracked.priority = true;
        let incoming = vec![show("tv:1")];

        let outcome = import_merge(vec![tracked], incoming);
        assert!(outcome.shows[0].priority);
    }

    #[test]
    fn replace_import_discards_the_current_collection() {
        let replaced = import_replace(vec![show("mal:9")]);
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].id, "mal:9");
    }
}
