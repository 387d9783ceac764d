use serde::{Deserialize, Serialize};

/// Ordering of the tracked collection. Stored as a user preference, so the
/// string forms round-trip through the preferences file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Ascending next-episode airstamp; shows without one sort last.
    #[default]
    Soonest,
    /// Case-folded name comparison.
    Alpha,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Soonest => "soonest",
            SortMode::Alpha => "alpha",
        }
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "soonest" => Ok(SortMode::Soonest),
            "alpha" => Ok(SortMode::Alpha),
            _ => Err(format!("invalid sort mode: {}. Use 'soonest' or 'alpha'", s)),
        }
    }
}
