use rand::prelude::*;

use super::process::Process;
use crate::core::Ticks;

/// Parameters of a Bernoulli workload: at every tick a process arrives
/// with probability `p_arrival`, and is short with probability `p_short`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkloadConfig {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_ticks: Ticks,
    pub long_ticks: Ticks,
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
            seed: 0,
        }
    }
}

pub fn bernoulli_processes(config: &WorkloadConfig) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut processes = Vec::new();

    for t in 0..config.ticks {
        if rng.random::<f64>() < config.p_arrival {
            let burst = if rng.random::<f64>() < config.p_short {
                config.short_ticks
            } else {
                config.long_ticks
            };

            processes.push(Process::new(processes.len() as u64 + 1, t, burst));
        }
    }

    processes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_workload() {
        let config = WorkloadConfig {
            seed: 7,
            ..WorkloadConfig::default()
        };
        assert_eq!(bernoulli_processes(&config), bernoulli_processes(&config));
    }

    #[test]
    fn arrivals_are_sorted_and_bursts_bimodal() {
        let config = WorkloadConfig {
            ticks: 200,
            p_arrival: 0.5,
            ..WorkloadConfig::default()
        };
        let processes = bernoulli_processes(&config);

        assert!(!processes.is_empty());
        assert!(processes.windows(2).all(|w| w[0].arrival < w[1].arrival));
        assert!(
            processes
                .iter()
                .all(|p| p.burst == config.short_ticks || p.burst == config.long_ticks)
        );
        assert!(processes.iter().zip(1..).all(|(p, id)| p.id == id));
    }

    #[test]
    fn certain_arrival_fills_every_tick() {
        let config = WorkloadConfig {
            ticks: 10,
            p_arrival: 1.0,
            ..WorkloadConfig::default()
        };
        assert_eq!(bernoulli_processes(&config).len(), 10);
    }
}
