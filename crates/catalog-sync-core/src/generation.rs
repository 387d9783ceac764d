use std::sync::atomic::{AtomicU64, Ordering};

/// Epoch counter guarding late results.
///
/// In-flight catalog calls are never cancelled. Instead, whoever owns a
/// view bumps the generation on every switch; a load that completes
/// afterwards observes the mismatch and discards its result instead of
/// applying stale data.
#[derive(Debug, Default)]
pub struct ViewGeneration(AtomicU64);

impl ViewGeneration {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// The generation to capture before starting a load.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Invalidate every load started before this call; returns the new
    /// generation.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Whether a load started at `started_at` may still be applied.
    pub fn is_current(&self, started_at: u64) -> bool {
        self.current() == started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_from_the_current_generation_applies() {
        let generation = ViewGeneration::new();
        let started_at = generation.current();
        assert!(generation.is_current(started_at));
    }

    #[test]
    fn a_view_switch_invalidates_in_flight_loads() {
        let generation = ViewGeneration::new();
        let started_at = generation.current();
        generation.bump();
        assert!(!generation.is_current(started_at));
    }

    #[test]
    fn bump_returns_the_generation_its_own_load_runs_under() {
        let generation = ViewGeneration::new();
        let mine = generation.bump();
        assert!(generation.is_current(mine));
        generation.bump();
        assert!(!generation.is_current(mine));
    }
}
