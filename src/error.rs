//! Error types for configuration, kitchen contract violations, and runs.

use thiserror::Error;

use crate::types::{SlotIndex, WorkerName};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing ramen count")]
    MissingUnits,

    #[error("invalid {field} value: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("burner count must be > 0")]
    NoBurners,

    #[error("at least one worker is required")]
    NoWorkers,

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Misuse of the burner table. These only show up when a worker is buggy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KitchenError {
    #[error("burner [{slot}] does not exist")]
    NoSuchSlot { slot: SlotIndex },

    #[error("burner [{slot}] released by {worker} while unoccupied")]
    NotOccupied { slot: SlotIndex, worker: WorkerName },

    #[error("burner [{slot}] released by non-owner {worker} (held by {owner})")]
    NotOwner {
        slot: SlotIndex,
        worker: WorkerName,
        owner: WorkerName,
    },
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn worker {worker}")]
    Spawn {
        worker: WorkerName,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: WorkerName },
}
