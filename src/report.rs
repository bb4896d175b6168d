use std::fmt;

use crate::sim::Schedule;

/// Gantt chart on one line: `P1 (0-5) → P2 (5-8)`.
pub fn gantt_line(schedule: &Schedule) -> String {
    schedule
        .timeline
        .iter()
        .map(|seg| format!("P{} ({}-{})", seg.pid, seg.start, seg.end))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Full report: Gantt chart, per-process table and averages.
pub struct Report<'a>(pub &'a Schedule);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self.0;

        writeln!(f, "{}", schedule.policy)?;
        writeln!(f, "\nGantt Chart:\n{}\n", gantt_line(schedule))?;
        writeln!(
            f,
            "{:>5} {:>8} {:>6} {:>11} {:>11} {:>8} {:>9}",
            "PID", "Arrival", "Burst", "Completion", "Turnaround", "Waiting", "Response"
        )?;
        for m in &schedule.metrics {
            writeln!(
                f,
                "{:>5} {:>8} {:>6} {:>11} {:>11} {:>8} {:>9}",
                format!("P{}", m.pid),
                m.arrival,
                m.burst,
                m.completion,
                m.turnaround,
                m.waiting,
                m.response
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Average Waiting Time: {:.2}", schedule.average_waiting())?;
        writeln!(
            f,
            "Average Turnaround Time: {:.2}",
            schedule.average_turnaround()
        )?;
        writeln!(f, "Average Response Time: {:.2}", schedule.average_response())?;
        writeln!(
            f,
            "CPU Utilization: {:.2}% over {} ticks, {} context switches",
            schedule.cpu_utilization() * 100.0,
            schedule.makespan(),
            schedule.context_switches()
        )
    }
}

pub fn render(schedule: &Schedule) -> String {
    Report(schedule).to_string()
}

/// One line per policy for side-by-side comparison.
pub fn summary_line(label: &str, schedule: &Schedule) -> String {
    format!(
        "{:<28} avg wait {:>7.2}  avg turnaround {:>7.2}  max wait {:>4}  switches {:>3}",
        label,
        schedule.average_waiting(),
        schedule.average_turnaround(),
        schedule.max_waiting(),
        schedule.context_switches()
    )
}
