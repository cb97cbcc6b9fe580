//! Run driver: builds the kitchen, starts the cooks, and collects the summary.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use log::info;

use crate::error::{ConfigError, SimError};
use crate::kitchen::{Kitchen, KitchenStats};
use crate::metrics::BurnerMetrics;
use crate::types::{CookTiming, WorkerName, WorkerReport};
use crate::worker::Worker;

pub const DEFAULT_WORKERS: [&str; 4] = ["A", "B", "C", "D"];
pub const DEFAULT_BURNERS: usize = 4;

/// Best-effort CPU user/system time snapshot (seconds) on Unix platforms.
#[cfg(unix)]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    use libc::{RUSAGE_SELF, getrusage, rusage};
    // SAFETY: rusage is plain old data; all-zero is a valid value.
    let mut usage: rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { getrusage(RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return None;
    }
    let user = usage.ru_utime.tv_sec as f64 + (usage.ru_utime.tv_usec as f64 / 1_000_000.0);
    let sys = usage.ru_stime.tv_sec as f64 + (usage.ru_stime.tv_usec as f64 / 1_000_000.0);
    Some((user, sys))
}

/// Stub on non-Unix platforms.
#[cfg(not(unix))]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    None
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub units: u64,
    pub workers: Vec<WorkerName>,
    pub burners: usize,
    pub timing: CookTiming,
}

impl SimConfig {
    /// Four cooks (A-D) on four burners with the default timing.
    pub fn new(units: u64) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers.is_empty() {
            return Err(ConfigError::NoWorkers);
        }
        if self.burners == 0 {
            return Err(ConfigError::NoBurners);
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            units: 0,
            workers: DEFAULT_WORKERS.iter().map(|name| name.to_string()).collect(),
            burners: DEFAULT_BURNERS,
            timing: CookTiming::default(),
        }
    }
}

/// Everything observed once all cooks have gone home.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub units_total: u64,
    pub burners: usize,
    pub workers: Vec<WorkerReport>,
    pub kitchen: KitchenStats,
    pub burners_left_occupied: usize,
    pub max_burner_occupancy: usize,
    pub burner_violation: bool,
    pub elapsed_ms: f64,
    pub cpu_user_s: Option<f64>,
    pub cpu_sys_s: Option<f64>,
}

impl RunSummary {
    pub fn skipped_rounds(&self) -> usize {
        self.workers.iter().map(|w| w.skipped_rounds).sum()
    }

    pub fn release_failures(&self) -> usize {
        self.workers.iter().map(|w| w.release_failures).sum()
    }

    /// Consumption adds up, every claim was released, and no burner was shared.
    pub fn is_consistent(&self) -> bool {
        let consumed: usize = self.workers.iter().map(|w| w.units).sum();
        consumed as u64 == self.units_total
            && self.kitchen.units_consumed == self.units_total
            && self.kitchen.remaining_units == 0
            && self.kitchen.burner_claims == self.kitchen.burner_releases
            && self.burners_left_occupied == 0
            && !self.burner_violation
    }
}

/// Start one thread per configured cook and wait for all of them.
pub fn run(config: &SimConfig) -> Result<RunSummary, SimError> {
    config.validate()?;
    info!(
        "[SIM] start units={} workers={} burners={}",
        config.units,
        config.workers.len(),
        config.burners
    );

    let kitchen = Arc::new(Kitchen::new(config.units, config.burners));
    let metrics = Arc::new(BurnerMetrics::new(config.burners));

    let cpu_start = cpu_times_seconds();
    let start = Instant::now();
    let mut handles = Vec::with_capacity(config.workers.len());
    for name in &config.workers {
        let worker = Worker::new(name.clone(), Arc::clone(&kitchen), config.timing)
            .with_metrics(Arc::clone(&metrics));
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || worker.run())
            .map_err(|source| SimError::Spawn {
                worker: name.clone(),
                source,
            })?;
        handles.push((name.clone(), handle));
    }

    let mut workers = Vec::with_capacity(handles.len());
    let mut panicked = None;
    for (name, handle) in handles {
        match handle.join() {
            Ok(report) => workers.push(report),
            Err(_) => {
                panicked.get_or_insert(name);
            }
        }
    }
    if let Some(worker) = panicked {
        return Err(SimError::WorkerPanicked { worker });
    }

    let elapsed_ms = start.elapsed().as_millis() as f64;
    let (cpu_user_s, cpu_sys_s) = match (cpu_start, cpu_times_seconds()) {
        (Some((user_start, sys_start)), Some((user_end, sys_end))) => {
            (Some(user_end - user_start), Some(sys_end - sys_start))
        }
        _ => (None, None),
    };
    let burners_left_occupied = kitchen
        .burner_snapshot()
        .iter()
        .filter(|burner| burner.is_some())
        .count();
    info!(
        "[SIM] finished in {elapsed_ms}ms remaining={} occupancy={} burners:{}",
        kitchen.remaining_units(),
        metrics.current_occupancy(),
        kitchen.render_burners()
    );

    Ok(RunSummary {
        units_total: config.units,
        burners: config.burners,
        workers,
        kitchen: kitchen.stats(),
        burners_left_occupied,
        max_burner_occupancy: metrics.max_occupancy(),
        burner_violation: metrics.has_violation(),
        elapsed_ms,
        cpu_user_s,
        cpu_sys_s,
    })
}

/// Print the end-of-run block consumed by humans and the CLI tests.
pub fn print_summary(summary: &RunSummary) {
    let units_per_worker: Vec<String> = summary
        .workers
        .iter()
        .map(|w| format!("{}:{}", w.name, w.units))
        .collect();
    let cpu_user = summary
        .cpu_user_s
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "NA".to_string());
    let cpu_sys = summary
        .cpu_sys_s
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "NA".to_string());

    println!("RUN SUMMARY");
    println!(
        "workers={} burners={} units_total={}",
        summary.workers.len(),
        summary.burners,
        summary.units_total
    );
    println!("units_consumed={}", summary.kitchen.units_consumed);
    println!("units_per_worker=[{}]", units_per_worker.join(", "));
    println!("burner_claims={}", summary.kitchen.burner_claims);
    println!("burner_releases={}", summary.kitchen.burner_releases);
    println!("skipped_rounds={}", summary.skipped_rounds());
    println!("remaining_units={}", summary.kitchen.remaining_units);
    println!("max_burner_occupancy={}", summary.max_burner_occupancy);
    println!("burner_violation={}", summary.burner_violation);
    println!("consistent={}", summary.is_consistent());
    println!(
        "elapsed_ms={:.2} cpu_user_s={cpu_user} cpu_sys_s={cpu_sys}",
        summary.elapsed_ms
    );
    if summary.release_failures() > 0 {
        eprintln!("# violation,release_failures,{}", summary.release_failures());
    }
}
