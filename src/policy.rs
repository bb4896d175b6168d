use std::{fmt, str::FromStr};

use crate::{
    Process, Schedule, SimError,
    scheduler::{
        FcfsScheduler, Quantum, RoundRobinScheduler, Scheduler, SjfScheduler, SrtScheduler,
    },
    sim::Sim,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    Srt,
    RoundRobin(Quantum),
}

impl Policy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => FcfsScheduler::NAME,
            Self::Sjf => SjfScheduler::NAME,
            Self::Srt => SrtScheduler::NAME,
            Self::RoundRobin(_) => RoundRobinScheduler::NAME,
        }
    }

    /// All four policies, Round Robin with `quantum`.
    pub fn all(quantum: Quantum) -> [Policy; 4] {
        [Self::Fcfs, Self::Sjf, Self::Srt, Self::RoundRobin(quantum)]
    }

    pub fn run(&self, processes: &[Process]) -> Result<Schedule, SimError> {
        match *self {
            Self::Fcfs => Sim::<FcfsScheduler>::new(processes, ())?.run(),
            Self::Sjf => Sim::<SjfScheduler>::new(processes, ())?.run(),
            Self::Srt => Sim::<SrtScheduler>::new(processes, ())?.run(),
            Self::RoundRobin(quantum) => Sim::<RoundRobinScheduler>::new(processes, quantum)?.run(),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin(quantum) => write!(f, "{} (q={})", self.name(), quantum.get()),
            _ => f.write_str(self.name()),
        }
    }
}

/// Scheduler specification: `F`, `J`, `S` or `R<quantum>`, or the
/// long forms `fcfs`, `sjf`, `srt`, `rr<quantum>`. Case-insensitive.
impl FromStr for Policy {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let spec = spec.trim().to_ascii_lowercase();
        match spec.as_str() {
            "f" | "fcfs" => return Ok(Self::Fcfs),
            "j" | "sjf" => return Ok(Self::Sjf),
            "s" | "srt" => return Ok(Self::Srt),
            _ => {}
        }

        let quantum = spec
            .strip_prefix("rr")
            .or_else(|| spec.strip_prefix('r'))
            .ok_or_else(|| {
                format!("Invalid scheduler specification: {spec}. Must be one of F, J, S or R<num>")
            })?;
        let quantum = quantum
            .trim_start_matches(':')
            .parse()
            .map_err(|_| format!("Invalid Round Robin quantum: {quantum:?}"))?;
        Quantum::new(quantum)
            .map(Self::RoundRobin)
            .map_err(|err| err.to_string())
    }
}
