//! Shared identifiers and timing knobs used across the kitchen.

use std::time::Duration;

/// Display name of a worker thread ("A", "B", ...).
pub type WorkerName = String;
/// Zero-based index into the burner table.
pub type SlotIndex = usize;

/// How long a worker keeps a burner and how long it may idle between rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookTiming {
    /// Fixed hold time on a claimed burner.
    pub cook: Duration,
    /// Exclusive upper bound of the random pause after each round.
    pub max_jitter: Duration,
}

impl CookTiming {
    pub fn from_millis(cook_ms: u64, max_jitter_ms: u64) -> Self {
        Self {
            cook: Duration::from_millis(cook_ms),
            max_jitter: Duration::from_millis(max_jitter_ms),
        }
    }
}

impl Default for CookTiming {
    fn default() -> Self {
        Self::from_millis(2000, 1000)
    }
}

/// What one worker did before the units ran out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub name: WorkerName,
    pub units: usize,
    pub burner_sessions: usize,
    /// Rounds where every burner was taken and the unit was cooked without one.
    pub skipped_rounds: usize,
    pub release_failures: usize,
}
