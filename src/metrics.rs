//! Independent occupancy probe used to catch burner double-booking.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::types::SlotIndex;

/// Per-burner occupancy counters fed by workers around each cook.
///
/// Counters live outside the kitchen lock, so a broken kitchen that hands the
/// same burner to two workers shows up here as a count above one.
pub struct BurnerMetrics {
    occupancy: AtomicUsize,
    max_occupancy: AtomicUsize,
    violation: AtomicBool,
    per_burner: Vec<AtomicUsize>,
}

impl BurnerMetrics {
    pub fn new(burners: usize) -> Self {
        Self {
            occupancy: AtomicUsize::new(0),
            max_occupancy: AtomicUsize::new(0),
            violation: AtomicBool::new(false),
            per_burner: (0..burners).map(|_| AtomicUsize::new(0)).collect(),
        }
    }

    /// Record that a worker now sits on `slot`.
    pub fn enter(&self, slot: SlotIndex) {
        let Some(counter) = self.per_burner.get(slot) else {
            self.violation.store(true, Ordering::SeqCst);
            return;
        };
        if counter.fetch_add(1, Ordering::SeqCst) + 1 > 1 {
            self.violation.store(true, Ordering::SeqCst);
        }
        let current = self.occupancy.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_occupancy.fetch_max(current, Ordering::SeqCst);
        if current > self.per_burner.len() {
            self.violation.store(true, Ordering::SeqCst);
        }
    }

    /// Record that the worker is about to give `slot` back.
    pub fn leave(&self, slot: SlotIndex) {
        let Some(counter) = self.per_burner.get(slot) else {
            return;
        };
        let burner_prev = counter.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(burner_prev > 0, "burner counter underflow");
        let occ_prev = self.occupancy.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(occ_prev > 0, "occupancy counter underflow");
    }

    /// Undo `leave` when the kitchen refused the release.
    pub fn revert_leave(&self, slot: SlotIndex) {
        if let Some(counter) = self.per_burner.get(slot) {
            counter.fetch_add(1, Ordering::SeqCst);
            self.occupancy.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn max_occupancy(&self) -> usize {
        self.max_occupancy.load(Ordering::SeqCst)
    }

    pub fn current_occupancy(&self) -> usize {
        self.occupancy.load(Ordering::SeqCst)
    }

    pub fn has_violation(&self) -> bool {
        self.violation.load(Ordering::SeqCst)
    }
}
