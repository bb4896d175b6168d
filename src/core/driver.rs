use super::{
    event::SchedCoreEvent,
    observer::Observer,
    state::{KernelCtx, TaskId, TaskState, Ticks},
    timeline::Timeline,
};
use crate::scheduler::{Dispatch, SCHED_ENQ_PREEMPT, SCHED_ENQ_WAKEUP, Scheduler};

pub struct SchedCore<S: Scheduler> {
    pub ctx: KernelCtx,
    pub scheduler: S,
    timeline: Timeline,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(params: S::Params) -> Self {
        let mut ctx = KernelCtx::new();
        let scheduler = S::init(&mut ctx, params);
        Self {
            ctx,
            scheduler,
            timeline: Timeline::new(),
            observer: Observer::new(),
        }
    }

    /// Gives the idle CPU to the scheduler's next pick and runs it for one
    /// slice. Returns `None` if the scheduler had nothing to run.
    pub fn run_slice(&mut self) -> Option<Vec<SchedCoreEvent>> {
        debug_assert!(self.ctx.cpu_is_idle(), "CPU must be idle between slices");

        let Dispatch { task, slice } = self.scheduler.dispatch(&mut self.ctx)?;
        let mut events = Vec::new();

        // The CPU idles until the picked task has arrived
        let arrival = self.ctx.task(task).arrival;
        if arrival > self.ctx.now {
            events.push(self.idle_until(arrival));
        }

        let from = self.ctx.set_running(task);
        events.push(SchedCoreEvent::TaskStateChange {
            task,
            from,
            to: TaskState::Running,
        });

        let start = self.ctx.now;
        let ran = slice.min(self.ctx.task(task).remaining());
        debug_assert!(ran > 0, "Dispatched task {task} with an empty slice");

        self.ctx.task_mut(task).consumed_service += ran;
        self.ctx.advance_time(ran);
        let end = self.ctx.now;

        let pid = self.ctx.task(task).pid;
        self.timeline.record(pid, start, end, S::COALESCE);
        events.push(SchedCoreEvent::Ran { task, start, end });
        log::trace!("{}: {pid} ran [{start}, {end})", S::NAME);

        self.ctx.clear_cpu();
        if self.ctx.task(task).remaining() == 0 {
            self.ctx.mark_completed(task, end);
            events.push(SchedCoreEvent::TaskStateChange {
                task,
                from: TaskState::Running,
                to: TaskState::Completed,
            });
            log::debug!("{}: {pid} completed at t={end}", S::NAME);
        } else {
            self.ctx.mark_runnable(task);
            events.push(SchedCoreEvent::TaskStateChange {
                task,
                from: TaskState::Running,
                to: TaskState::Runnable,
            });
            self.scheduler
                .enqueue(&mut self.ctx, task, SCHED_ENQ_PREEMPT);
        }

        self.observer.observe(&self.ctx, &self.timeline);
        Some(events)
    }

    pub fn wake_task(&mut self, task: TaskId) -> SchedCoreEvent {
        let from = self.ctx.task(task).state;
        self.ctx.mark_runnable(task);
        self.scheduler.enqueue(&mut self.ctx, task, SCHED_ENQ_WAKEUP);
        SchedCoreEvent::TaskStateChange {
            task,
            from,
            to: TaskState::Runnable,
        }
    }

    pub fn idle_until(&mut self, time: Ticks) -> SchedCoreEvent {
        let from = self.ctx.now;
        self.ctx.advance_to(time);
        log::trace!("{}: idle [{from}, {time})", S::NAME);
        SchedCoreEvent::CpuIdle { from, to: time }
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn into_parts(self) -> (KernelCtx, Timeline) {
        self.observer.finish(&self.ctx, &self.timeline);
        (self.ctx, self.timeline)
    }
}
