use super::{Dispatch, EnqueueFlags, KernelCtx, Scheduler, TaskId};
use crate::core::DsqId;

/// Non-preemptive shortest job first. A task is only enqueued once, so
/// its remaining service at enqueue time is its full burst.
pub struct SjfScheduler {
    ready: DsqId,
}

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "Shortest-Job-First";

    type Params = ();

    fn init(ctx: &mut KernelCtx, _params: ()) -> Self {
        Self {
            ready: ctx.create_dsq_priq(),
        }
    }

    fn enqueue(&mut self, ctx: &mut KernelCtx, task: TaskId, flags: EnqueueFlags) {
        debug_assert_eq!(
            flags & super::SCHED_ENQ_PREEMPT,
            0,
            "SJF never preempts task {task}"
        );
        ctx.dsq_push(self.ready, task);
    }

    fn dispatch(&mut self, ctx: &mut KernelCtx) -> Option<Dispatch> {
        let task = ctx.dsq_pop(self.ready)?;
        Some(Dispatch {
            task,
            slice: ctx.task(task).remaining(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Process, Segment, sjf};

    #[test]
    fn picks_shortest_arrived_job() {
        let schedule = sjf(&Process::numbered(&[(0, 5), (1, 3), (2, 8)])).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[
                Segment::new(1, 0, 5),
                Segment::new(2, 5, 8),
                Segment::new(3, 8, 16)
            ]
        );
    }

    #[test]
    fn shorter_late_job_does_not_preempt() {
        let schedule = sjf(&Process::numbered(&[(0, 6), (1, 1), (2, 3), (3, 2)])).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[
                Segment::new(1, 0, 6),
                Segment::new(2, 6, 7),
                Segment::new(4, 7, 9),
                Segment::new(3, 9, 12)
            ]
        );
        assert_eq!(schedule.waiting_time(4), Some(4));
    }

    #[test]
    fn equal_bursts_prefer_earlier_arrival_then_input_order() {
        let processes = vec![
            Process::new(1, 0, 4),
            Process::new(2, 2, 3),
            Process::new(3, 1, 3),
            Process::new(4, 1, 3),
        ];
        let schedule = sjf(&processes).unwrap();
        let order: Vec<_> = schedule.timeline.iter().map(|seg| seg.pid).collect();
        assert_eq!(order, vec![1, 3, 4, 2]);
    }

    #[test]
    fn idles_when_nothing_has_arrived() {
        let schedule = sjf(&Process::numbered(&[(3, 2), (10, 1)])).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[Segment::new(1, 3, 5), Segment::new(2, 10, 11)]
        );
        assert_eq!(schedule.turnaround_times(), vec![(1, 2), (2, 1)]);
    }
}
