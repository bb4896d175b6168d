use super::{
    state::{KernelCtx, TaskState},
    timeline::Timeline,
};

/// Consistency checks on the kernel context, compiled out of release builds.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, core: &KernelCtx, timeline: &Timeline) {
        self.step += 1;

        debug_assert!(
            core.current.is_none(),
            "CPU must be released at the end of step {}",
            self.step
        );

        for task in &core.tasks {
            debug_assert!(
                task.consumed_service <= task.required_service,
                "Task {} consumed more service than its burst",
                task.id
            );
        }

        for (&task_id, &dsq_id) in &core.task_to_dsq {
            let task = core.task(task_id);
            debug_assert_eq!(
                task.state,
                TaskState::Runnable,
                "Task {task_id} in DSQ {dsq_id:?} must be Runnable"
            );
            if let Some(dsq) = core.dsqs.get(dsq_id) {
                debug_assert!(
                    dsq.contains(task_id),
                    "task_to_dsq claims task {task_id} in DSQ {dsq_id:?}, but queue does not contain it"
                );
            } else {
                debug_assert!(false, "task_to_dsq references unknown DSQ {dsq_id:?}");
            }
        }

        if let Some(last) = timeline.segments().last() {
            debug_assert_eq!(last.end, core.now, "Timeline must end at the current time");
        }
    }

    // Whole-run invariants once every task has completed
    pub fn finish(&self, core: &KernelCtx, timeline: &Timeline) {
        debug_assert!(
            timeline
                .segments()
                .windows(2)
                .all(|pair| pair[0].end <= pair[1].start),
            "Timeline segments overlap or are out of order"
        );
        debug_assert!(
            core.dsqs.values().all(|dsq| dsq.is_empty()),
            "DSQs must be drained once every task has completed"
        );

        for task in &core.tasks {
            debug_assert_eq!(
                timeline.service_of(task.pid),
                task.required_service,
                "Process {} received the wrong amount of service",
                task.pid
            );
            debug_assert_eq!(
                timeline.completion_of(task.pid),
                task.completion_time,
                "Process {} completion disagrees with the timeline",
                task.pid
            );
            debug_assert!(
                timeline
                    .segments_of(task.pid)
                    .next()
                    .is_none_or(|seg| seg.start >= task.arrival),
                "Process {} ran before it arrived",
                task.pid
            );
        }
    }
}
