use catalog_sync_models::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const WINDOW_MS: i64 = 7 * 24 * 3_600 * 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownMode {
    None,
    Past,
    Upcoming,
}

/// Display-ready countdown state for one airstamp at one instant. Computed
/// purely from the two inputs, so a live view can re-evaluate it every
/// second without consulting anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownInfo {
    pub mode: CountdownMode,
    pub label: String,
    /// 5-100; rises toward 100 as air time approaches within a seven-day
    /// window. The floor of 5 keeps the indicator visibly non-empty.
    pub progress: u8,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownInfo {
    fn flat(mode: CountdownMode, label: &str, progress: u8) -> Self {
        Self {
            mode,
            label: label.to_string(),
            progress,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

pub fn countdown_info(airstamp: Option<&str>, now: DateTime<Utc>) -> CountdownInfo {
    let Some(raw) = airstamp else {
        return CountdownInfo::flat(CountdownMode::None, "No upcoming episodes", 100);
    };
    let Some(air) = parse_timestamp(raw) else {
        return CountdownInfo::flat(CountdownMode::None, "Unknown date", 50);
    };

    let diff_ms = (air - now).num_milliseconds();
    if diff_ms <= 0 {
        return CountdownInfo::flat(CountdownMode::Past, "Released", 100);
    }

    let total_seconds = (diff_ms / 1_000) as u64;
    let days = total_seconds / SECONDS_PER_DAY;
    let hours = total_seconds % SECONDS_PER_DAY / SECONDS_PER_HOUR;
    let minutes = total_seconds % SECONDS_PER_HOUR / 60;
    let seconds = total_seconds % 60;

    let ratio = (diff_ms as f64 / WINDOW_MS as f64).min(1.0);
    let progress = (100.0 - ratio * 100.0).round().clamp(5.0, 100.0) as u8;

    CountdownInfo {
        mode: CountdownMode::Upcoming,
        label: format!("{}d {}h {}m {}s", days, hours, minutes, seconds),
        progress,
        days,
        hours,
        minutes,
        seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    #[test]
    fn absent_airstamp() {
        let info = countdown_info(None, at("2026-08-04T12:00:00Z"));
        assert_eq!(info.mode, CountdownMode::None);
        assert_eq!(info.label, "No upcoming episodes");
        assert_eq!(info.progress, 100);
    }

    #[test]
    fn unparsable_airstamp() {
        let info = countdown_info(Some("soon(tm)"), at("2026-08-04T12:00:00Z"));
        assert_eq!(info.mode, CountdownMode::None);
        assert_eq!(info.label, "Unknown date");
        assert_eq!(info.progress, 50);
    }

    #[test]
    fn past_airstamp_is_released() {
        let info = countdown_info(Some("2026-08-04T11:59:59Z"), at("2026-08-04T12:00:00Z"));
        assert_eq!(info.mode, CountdownMode::Past);
        assert_eq!(info.label, "Released");
        assert_eq!(info.progress, 100);
        assert_eq!((info.days, info.hours, info.minutes, info.seconds), (0, 0, 0, 0));
    }

    #[test]
    fn decomposition_is_exact() {
        let now = at("2026-08-04T12:00:00Z");
        let air = at("2026-08-06T15:30:45Z");
        let info = countdown_info(Some("2026-08-06T15:30:45Z"), now);
        assert_eq!(info.mode, CountdownMode::Upcoming);
        let recomposed =
            info.days * 86_400 + info.hours * 3_600 + info.minutes * 60 + info.seconds;
        assert_eq!(recomposed as i64, (air - now).num_seconds());
        assert_eq!((info.days, info.hours, info.minutes, info.seconds), (2, 3, 30, 45));
    }

    #[test]
    fn progress_two_days_out_is_between_floor_and_full() {
        let info = countdown_info(Some("2026-08-06T12:00:00Z"), at("2026-08-04T12:00:00Z"));
        assert!(info.progress > 5 && info.progress < 100);
        // 2/7 of the window remains
        assert_eq!(info.progress, 71);
    }

    #[test]
    fn progress_is_monotone_in_remaining_time() {
        let now = at("2026-08-04T12:00:00Z");
        let stamps = [
            "2026-08-04T12:00:01Z",
            "2026-08-05T12:00:00Z",
            "2026-08-07T12:00:00Z",
            "2026-08-10T12:00:00Z",
            "2026-08-11T12:00:00Z",
            "2026-09-04T12:00:00Z",
        ];
        let mut previous = 101u8;
        for stamp in stamps {
            let progress = countdown_info(Some(stamp), now).progress;
            assert!(progress <= previous, "progress must not rise as time-to-air grows");
            assert!((5..=100).contains(&progress));
            previous = progress;
        }
    }

    #[test]
    fn far_future_clamps_to_floor() {
        let info = countdown_info(Some("2027-08-04T12:00:00Z"), at("2026-08-04T12:00:00Z"));
        assert_eq!(info.progress, 5);
    }
}
