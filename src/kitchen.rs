//! Shared kitchen state: the ramen counter and the burner table.

use std::sync::Mutex;

use log::{debug, error, info};

use crate::error::KitchenError;
use crate::types::{SlotIndex, WorkerName};

/// Consistent snapshot of how much the kitchen has done so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KitchenStats {
    pub remaining_units: u64,
    pub units_consumed: u64,
    pub burner_claims: u64,
    pub burner_releases: u64,
}

struct KitchenState {
    remaining_units: u64,
    burners: Vec<Option<WorkerName>>,
    units_consumed: u64,
    burner_claims: u64,
    burner_releases: u64,
}

impl KitchenState {
    fn render_burners(&self) -> String {
        let mut board = String::with_capacity(self.burners.len() * 2);
        for burner in &self.burners {
            board.push(' ');
            board.push_str(burner.as_deref().unwrap_or("-"));
        }
        board
    }
}

/// One lock guards the whole kitchen; every operation is a single critical section.
pub struct Kitchen {
    state: Mutex<KitchenState>,
}

impl Kitchen {
    /// Create a kitchen with `units` packets and `burners` unoccupied burners.
    pub fn new(units: u64, burners: usize) -> Self {
        Self {
            state: Mutex::new(KitchenState {
                remaining_units: units,
                burners: vec![None; burners],
                units_consumed: 0,
                burner_claims: 0,
                burner_releases: 0,
            }),
        }
    }

    /// Take one packet if any are left, returning how many remain afterwards.
    pub fn try_consume_unit(&self, worker: &str) -> Option<u64> {
        let mut guard = self.state.lock().expect("kitchen mutex poisoned");
        if guard.remaining_units == 0 {
            return None;
        }
        guard.remaining_units -= 1;
        guard.units_consumed += 1;
        let left = guard.remaining_units;
        info!("{worker}: {left} left");
        Some(left)
    }

    /// Claim the lowest-numbered free burner for `worker`.
    pub fn claim_free_slot(&self, worker: &str) -> Option<SlotIndex> {
        let mut guard = self.state.lock().expect("kitchen mutex poisoned");
        let slot = guard.burners.iter().position(Option::is_none)?;
        guard.burners[slot] = Some(worker.to_string());
        guard.burner_claims += 1;
        info!("{worker}: burner [{}] ON", slot + 1);
        debug!("burners:{}", guard.render_burners());
        Some(slot)
    }

    /// Give a burner back. Only its current holder may release it.
    pub fn release_slot(&self, slot: SlotIndex, worker: &str) -> Result<(), KitchenError> {
        let outcome = {
            let mut guard = self.state.lock().expect("kitchen mutex poisoned");
            let holder = guard.burners.get(slot).cloned();
            match holder {
                None => Err(KitchenError::NoSuchSlot { slot }),
                Some(None) => Err(KitchenError::NotOccupied {
                    slot,
                    worker: worker.to_string(),
                }),
                Some(Some(owner)) if owner != worker => Err(KitchenError::NotOwner {
                    slot,
                    worker: worker.to_string(),
                    owner,
                }),
                Some(Some(_)) => {
                    guard.burners[slot] = None;
                    guard.burner_releases += 1;
                    info!("{worker}: burner [{}] OFF", slot + 1);
                    debug!("burners:{}", guard.render_burners());
                    Ok(())
                }
            }
        };
        // Report outside the lock so a debug panic does not poison the kitchen.
        if let Err(err) = &outcome {
            error!("[BURNER] {err}");
            debug_assert!(false, "{err}");
        }
        outcome
    }

    pub fn remaining_units(&self) -> u64 {
        let guard = self.state.lock().expect("kitchen mutex poisoned");
        guard.remaining_units
    }

    /// Copy of the burner table; `None` marks a free burner.
    pub fn burner_snapshot(&self) -> Vec<Option<WorkerName>> {
        let guard = self.state.lock().expect("kitchen mutex poisoned");
        guard.burners.clone()
    }

    /// Burner board as text, e.g. `" A - C -"`.
    pub fn render_burners(&self) -> String {
        let guard = self.state.lock().expect("kitchen mutex poisoned");
        guard.render_burners()
    }

    pub fn stats(&self) -> KitchenStats {
        let guard = self.state.lock().expect("kitchen mutex poisoned");
        KitchenStats {
            remaining_units: guard.remaining_units,
            units_consumed: guard.units_consumed,
            burner_claims: guard.burner_claims,
            burner_releases: guard.burner_releases,
        }
    }
}
