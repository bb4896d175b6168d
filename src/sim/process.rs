use rustc_hash::FxHashSet;

use crate::{
    core::state::{ProcessId, Ticks},
    error::InputError,
};

/// A process to simulate. Input order matters: it breaks every tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Process {
    pub id: ProcessId,
    pub arrival: Ticks,
    pub burst: Ticks,
}

impl Process {
    pub fn new(id: ProcessId, arrival: Ticks, burst: Ticks) -> Self {
        Self { id, arrival, burst }
    }

    /// Builds processes from `(arrival, burst)` pairs, numbering them 1, 2, ...
    pub fn numbered(specs: &[(Ticks, Ticks)]) -> Vec<Process> {
        specs
            .iter()
            .zip(1..)
            .map(|(&(arrival, burst), id)| Process::new(id, arrival, burst))
            .collect()
    }
}

pub fn validate(processes: &[Process]) -> Result<(), InputError> {
    if processes.is_empty() {
        return Err(InputError::Empty);
    }

    let mut seen = FxHashSet::default();
    let mut latest_arrival: Ticks = 0;
    let mut total_burst: Ticks = 0;
    for process in processes {
        if process.burst == 0 {
            return Err(InputError::NonPositiveBurst { pid: process.id });
        }
        if !seen.insert(process.id) {
            return Err(InputError::DuplicateId { pid: process.id });
        }
        latest_arrival = latest_arrival.max(process.arrival);
        total_burst = total_burst
            .checked_add(process.burst)
            .ok_or(InputError::Overflow)?;
    }

    // Every schedule finishes by then, so the clock never leaves Ticks
    latest_arrival
        .checked_add(total_burst)
        .map(|_| ())
        .ok_or(InputError::Overflow)
}
