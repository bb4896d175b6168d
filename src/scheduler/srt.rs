use super::{Dispatch, EnqueueFlags, KernelCtx, Scheduler, TaskId};
use crate::core::DsqId;

// One tick per decision, so every newly arrived task is considered
const SRT_SLICE: u64 = 1;

/// Preemptive shortest remaining time. The running task goes back on
/// the queue after every tick with its reduced remaining service.
pub struct SrtScheduler {
    ready: DsqId,
}

impl Scheduler for SrtScheduler {
    const NAME: &'static str = "Shortest-Remaining-Time";
    const COALESCE: bool = true;

    type Params = ();

    fn init(ctx: &mut KernelCtx, _params: ()) -> Self {
        Self {
            ready: ctx.create_dsq_priq(),
        }
    }

    fn enqueue(&mut self, ctx: &mut KernelCtx, task: TaskId, flags: EnqueueFlags) {
        let _ = flags;
        ctx.dsq_push(self.ready, task);
    }

    fn dispatch(&mut self, ctx: &mut KernelCtx) -> Option<Dispatch> {
        let task = ctx.dsq_pop(self.ready)?;
        Some(Dispatch {
            task,
            slice: SRT_SLICE,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Process, Segment, srt};

    #[test]
    fn shorter_arrival_preempts() {
        let schedule = srt(&Process::numbered(&[(0, 8), (1, 4)])).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[
                Segment::new(1, 0, 1),
                Segment::new(2, 1, 5),
                Segment::new(1, 5, 12)
            ]
        );
        assert_eq!(schedule.turnaround_times(), vec![(1, 12), (2, 4)]);
        assert_eq!(schedule.waiting_times(), vec![(1, 4), (2, 0)]);
    }

    #[test]
    fn equal_remaining_does_not_preempt_earlier_arrival() {
        // At t=2 process 1 has 3 left, process 2 arrives with 3
        let schedule = srt(&Process::numbered(&[(0, 5), (2, 3)])).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[Segment::new(1, 0, 5), Segment::new(2, 5, 8)]
        );
    }

    #[test]
    fn resumes_after_idle_as_new_segment() {
        let schedule = srt(&Process::numbered(&[(0, 2), (5, 3), (6, 1)])).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[
                Segment::new(1, 0, 2),
                Segment::new(2, 5, 6),
                Segment::new(3, 6, 7),
                Segment::new(2, 7, 9)
            ]
        );
        assert_eq!(schedule.timeline.service_of(2), 3);
        assert_eq!(schedule.response_time(2), Some(0));
    }
}
