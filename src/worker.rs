//! Cook loop run by each worker thread.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{trace, warn};
use rand::Rng;

use crate::kitchen::Kitchen;
use crate::metrics::BurnerMetrics;
use crate::types::{CookTiming, WorkerName, WorkerReport};

/// Sleep for up to `duration`.
///
/// `Thread::unpark` from a supervisor (or a spurious wake-up) ends the pause
/// early; callers carry on as if the full time had passed.
fn pause(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    let start = Instant::now();
    thread::park_timeout(duration);
    let slept = start.elapsed();
    if slept < duration {
        trace!("pause woke early after {}ms", slept.as_millis());
    }
}

fn jitter(max: Duration) -> Duration {
    let max_us = max.as_micros() as u64;
    if max_us == 0 {
        return Duration::ZERO;
    }
    Duration::from_micros(rand::thread_rng().gen_range(0..max_us))
}

/// One cook sharing the kitchen with the others.
pub struct Worker {
    name: WorkerName,
    kitchen: Arc<Kitchen>,
    timing: CookTiming,
    metrics: Option<Arc<BurnerMetrics>>,
}

impl Worker {
    pub fn new(name: impl Into<WorkerName>, kitchen: Arc<Kitchen>, timing: CookTiming) -> Self {
        Self {
            name: name.into(),
            kitchen,
            timing,
            metrics: None,
        }
    }

    /// Feed every claim and release into an occupancy probe.
    pub fn with_metrics(mut self, metrics: Arc<BurnerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Cook until the kitchen runs out of ramen.
    pub fn run(self) -> WorkerReport {
        let mut report = WorkerReport {
            name: self.name.clone(),
            ..WorkerReport::default()
        };

        while self.kitchen.try_consume_unit(&self.name).is_some() {
            report.units += 1;

            // One scan per packet; a full stove means this packet goes without a burner.
            match self.kitchen.claim_free_slot(&self.name) {
                Some(slot) => {
                    if let Some(metrics) = &self.metrics {
                        metrics.enter(slot);
                    }
                    pause(self.timing.cook);
                    if let Some(metrics) = &self.metrics {
                        metrics.leave(slot);
                    }
                    match self.kitchen.release_slot(slot, &self.name) {
                        Ok(()) => report.burner_sessions += 1,
                        Err(err) => {
                            warn!("{}: release failed: {err}", self.name);
                            report.release_failures += 1;
                            if let Some(metrics) = &self.metrics {
                                metrics.revert_leave(slot);
                            }
                        }
                    }
                }
                None => report.skipped_rounds += 1,
            }

            pause(jitter(self.timing.max_jitter));
        }

        report
    }
}
