//! Discrete-time simulation of single-CPU process scheduling.
//!
//! Each policy turns a list of [`Process`]es into a [`Schedule`]: the
//! Gantt chart of who ran when, plus per-process waiting and turnaround
//! times.
//!
//! ```
//! use cpu_sched_model::{Process, srt};
//!
//! let schedule = srt(&Process::numbered(&[(0, 8), (1, 4)])).unwrap();
//! assert_eq!(schedule.waiting_times(), vec![(1, 4), (2, 0)]);
//! ```

pub mod core;
pub mod error;
pub mod input;
pub mod logger;
pub mod policy;
pub mod prompt;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use crate::core::{ProcessId, SchedCoreEvent, Segment, Ticks, Timeline};
pub use error::{InputError, SimError};
pub use policy::Policy;
pub use scheduler::{Quantum, Scheduler};
pub use sim::{Process, ProcessMetrics, Schedule, Sim};

/// First-Come, First-Served.
pub fn fcfs(processes: &[Process]) -> Result<Schedule, SimError> {
    Policy::Fcfs.run(processes)
}

/// Non-preemptive Shortest-Job-First.
pub fn sjf(processes: &[Process]) -> Result<Schedule, SimError> {
    Policy::Sjf.run(processes)
}

/// Preemptive Shortest-Remaining-Time.
pub fn srt(processes: &[Process]) -> Result<Schedule, SimError> {
    Policy::Srt.run(processes)
}

/// Round Robin with a fixed `quantum`, which must be greater than zero.
pub fn round_robin(processes: &[Process], quantum: Ticks) -> Result<Schedule, SimError> {
    Policy::RoundRobin(Quantum::new(quantum)?).run(processes)
}
