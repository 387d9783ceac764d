use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry from the TV catalog's episode list, prior to any schedule
/// computation. `airstamp` is kept as the raw ISO-8601 string the catalog
/// returned; entries without a parsable airstamp are skipped when the next
/// episode is computed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub season: u32,
    pub number: u32,
    pub name: Option<String>,
    pub airstamp: Option<String>,
}

/// The upcoming episode attached to a tracked show. The airstamp was in the
/// future when this value was computed; it may lapse into the past before
/// the next refresh, so consumers treat a past airstamp as released.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NextEpisode {
    pub season: u32,
    pub number: u32,
    pub airstamp: String,
}

/// Parse an ISO-8601 timestamp as stored on `NextEpisode::airstamp` and
/// `Show::last_fetched_at`. Returns `None` for anything unparsable; callers
/// decide what a missing timestamp means (stale, unknown date, sorts last).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_timestamp("2026-08-10T21:00:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-08-10T19:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
