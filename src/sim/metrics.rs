use average::{Estimate, Mean};

use crate::core::{
    state::{ProcessId, Task, Ticks},
    timeline::Timeline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub pid: ProcessId,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub first_run: Ticks,
    pub completion: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
    pub response: Ticks,
}

impl ProcessMetrics {
    /// `None` if the task never ran to completion.
    pub fn derive(task: &Task) -> Option<Self> {
        let completion = task.completion_time?;
        let first_run = task.first_run?;
        let turnaround = completion - task.arrival;
        Some(Self {
            pid: task.pid,
            arrival: task.arrival,
            burst: task.required_service,
            first_run,
            completion,
            turnaround,
            waiting: turnaround - task.required_service,
            response: first_run - task.arrival,
        })
    }
}

/// Outcome of one simulation run. `metrics` follows input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub policy: &'static str,
    pub timeline: Timeline,
    pub metrics: Vec<ProcessMetrics>,
}

impl Schedule {
    pub fn waiting_times(&self) -> Vec<(ProcessId, Ticks)> {
        self.metrics.iter().map(|m| (m.pid, m.waiting)).collect()
    }

    pub fn turnaround_times(&self) -> Vec<(ProcessId, Ticks)> {
        self.metrics.iter().map(|m| (m.pid, m.turnaround)).collect()
    }

    pub fn process(&self, pid: ProcessId) -> Option<&ProcessMetrics> {
        self.metrics.iter().find(|m| m.pid == pid)
    }

    pub fn waiting_time(&self, pid: ProcessId) -> Option<Ticks> {
        self.process(pid).map(|m| m.waiting)
    }

    pub fn turnaround_time(&self, pid: ProcessId) -> Option<Ticks> {
        self.process(pid).map(|m| m.turnaround)
    }

    pub fn response_time(&self, pid: ProcessId) -> Option<Ticks> {
        self.process(pid).map(|m| m.response)
    }

    pub fn average_waiting(&self) -> f64 {
        avg(self.metrics.iter().map(|m| m.waiting))
    }

    pub fn average_turnaround(&self) -> f64 {
        avg(self.metrics.iter().map(|m| m.turnaround))
    }

    pub fn average_response(&self) -> f64 {
        avg(self.metrics.iter().map(|m| m.response))
    }

    pub fn max_waiting(&self) -> Ticks {
        self.metrics.iter().map(|m| m.waiting).max().unwrap_or(0)
    }

    pub fn makespan(&self) -> Ticks {
        self.timeline.makespan()
    }

    /// Busy share of `[0, makespan)`.
    pub fn cpu_utilization(&self) -> f64 {
        match self.makespan() {
            0 => 0.0,
            makespan => self.timeline.busy_time() as f64 / makespan as f64,
        }
    }

    pub fn context_switches(&self) -> usize {
        self.timeline.context_switches()
    }
}

fn avg(iter: impl Iterator<Item = Ticks>) -> f64 {
    iter.map(|ticks| ticks as f64).collect::<Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use crate::{Process, fcfs};

    #[test]
    fn averages_follow_per_process_values() {
        let schedule = fcfs(&Process::numbered(&[(0, 5), (1, 3), (2, 8)])).unwrap();

        assert!((schedule.average_waiting() - 10.0 / 3.0).abs() < 1e-9);
        assert!((schedule.average_turnaround() - 26.0 / 3.0).abs() < 1e-9);
        assert_eq!(schedule.max_waiting(), 6);
        assert_eq!(schedule.makespan(), 16);
        assert_eq!(schedule.context_switches(), 2);
        assert_eq!(schedule.turnaround_time(3), Some(14));
        assert_eq!(schedule.waiting_time(4), None);
    }

    #[test]
    fn utilization_accounts_for_idle_time() {
        let schedule = fcfs(&Process::numbered(&[(2, 2), (6, 2)])).unwrap();
        assert!((schedule.cpu_utilization() - 0.5).abs() < 1e-9);
        assert_eq!(schedule.process(1).map(|m| m.first_run), Some(2));
    }
}
