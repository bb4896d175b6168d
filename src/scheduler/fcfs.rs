use super::{Dispatch, EnqueueFlags, KernelCtx, Scheduler, TaskId};
use crate::core::DsqId;

/// Non-preemptive; runs processes in arrival order, ties in input order.
pub struct FcfsScheduler {
    ready: DsqId,
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "First-Come, First-Served";

    type Params = ();

    fn init(ctx: &mut KernelCtx, _params: ()) -> Self {
        Self {
            ready: ctx.create_dsq_fifo(),
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
            slice: ctx.task(task).remaining(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Process, Segment, fcfs};

    #[test]
    fn runs_in_arrival_order() {
        let schedule = fcfs(&Process::numbered(&[(0, 5), (1, 3), (2, 8)])).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[
                Segment::new(1, 0, 5),
                Segment::new(2, 5, 8),
                Segment::new(3, 8, 16)
            ]
        );
        assert_eq!(schedule.waiting_times(), vec![(1, 0), (2, 4), (3, 6)]);
        assert_eq!(schedule.turnaround_times(), vec![(1, 5), (2, 7), (3, 14)]);
    }

    #[test]
    fn equal_arrivals_keep_input_order() {
        let processes = vec![
            Process::new(9, 0, 2),
            Process::new(4, 0, 1),
            Process::new(7, 0, 3),
        ];
        let schedule = fcfs(&processes).unwrap();
        let order: Vec<_> = schedule.timeline.iter().map(|seg| seg.pid).collect();
        assert_eq!(order, vec![9, 4, 7]);
    }

    #[test]
    fn idles_until_late_arrival() {
        let schedule = fcfs(&Process::numbered(&[(4, 2), (0, 1)])).unwrap();

        assert_eq!(
            schedule.timeline.segments(),
            &[Segment::new(2, 0, 1), Segment::new(1, 4, 6)]
        );
        assert_eq!(schedule.timeline.idle_spans(), vec![(1, 4)]);
        // Metrics stay in input order
        assert_eq!(schedule.waiting_times(), vec![(1, 0), (2, 0)]);
    }
}
