use std::num::NonZeroU64;

use super::{Admission, Dispatch, EnqueueFlags, KernelCtx, Scheduler, TaskId};
use crate::{
    core::{DsqId, Ticks},
    error::InputError,
};

/// Round Robin time slice; always at least one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    pub fn new(ticks: Ticks) -> Result<Self, InputError> {
        NonZeroU64::new(ticks)
            .map(Self)
            .ok_or(InputError::NonPositiveQuantum)
    }

    pub fn get(self) -> Ticks {
        self.0.get()
    }
}

/// Single FIFO holding every process from t=0. A task that does not
/// finish its slice goes to the back; arrivals are never re-checked
/// against the clock, the popped task simply starts no earlier than its
/// arrival.
pub struct RoundRobinScheduler {
    ready: DsqId,
    quantum: Quantum,
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin";
    const ADMISSION: Admission = Admission::Upfront;

    type Params = Quantum;

    fn init(ctx: &mut KernelCtx, quantum: Quantum) -> Self {
        Self {
            ready: ctx.create_dsq_fifo(),
            quantum,
        }
    }

    fn enqueue(&mut self, ctx: &mut KernelCtx, task: TaskId, flags: EnqueueFlags) {
        if flags & super::SCHED_ENQ_PREEMPT != 0 {
            log::trace!(
                "t={} requeue {} behind {} others",
                ctx.now,
                ctx.task(task).pid,
                ctx.dsq_len(self.ready)
            );
        }
        ctx.dsq_push(self.ready, task);
    }

    fn dispatch(&mut self, ctx: &mut KernelCtx) -> Option<Dispatch> {
        let task = ctx.dsq_pop(self.ready)?;
        Some(Dispatch {
            task,
            slice: self.quantum.get(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Quantum;
    use crate::{InputError, Process, Segment, SimError, round_robin};

    #[test]
    fn alternates_between_ready_processes() {
        let schedule = round_robin(&Process::numbered(&[(0, 5), (1, 3)]), 2).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[
                Segment::new(1, 0, 2),
                Segment::new(2, 2, 4),
                Segment::new(1, 4, 6),
                Segment::new(2, 6, 7),
                Segment::new(1, 7, 8)
            ]
        );
        assert_eq!(schedule.turnaround_times(), vec![(1, 8), (2, 6)]);
        assert_eq!(schedule.waiting_times(), vec![(1, 3), (2, 3)]);
    }

    #[test]
    fn slices_of_a_lone_process_stay_separate() {
        let schedule = round_robin(&Process::numbered(&[(0, 5)]), 2).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[
                Segment::new(1, 0, 2),
                Segment::new(1, 2, 4),
                Segment::new(1, 4, 5)
            ]
        );
        assert_eq!(schedule.waiting_times(), vec![(1, 0)]);
    }

    #[test]
    fn popped_process_waits_for_its_arrival() {
        // Process 2 is queued from the start; the CPU idles until it arrives
        // even though process 1 still has work.
        let schedule = round_robin(&Process::numbered(&[(0, 4), (6, 1)]), 2).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[
                Segment::new(1, 0, 2),
                Segment::new(2, 6, 7),
                Segment::new(1, 7, 9)
            ]
        );
        assert_eq!(schedule.timeline.idle_spans(), vec![(2, 6)]);
    }

    #[test]
    fn rejects_zero_quantum() {
        assert_eq!(Quantum::new(0), Err(InputError::NonPositiveQuantum));
        assert_eq!(
            round_robin(&Process::numbered(&[(0, 1)]), 0).unwrap_err(),
            SimError::InvalidInput(InputError::NonPositiveQuantum)
        );
    }
}
