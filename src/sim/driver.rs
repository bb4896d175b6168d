use super::{
    metrics::{ProcessMetrics, Schedule},
    process::{self, Process},
};
use crate::{
    core::{
        driver::SchedCore,
        event::SchedCoreEvent,
        state::{TaskId, Ticks},
    },
    error::SimError,
    scheduler::{Admission, Scheduler},
};

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    // Tasks sorted by (admission time, input order)
    admissions: Vec<(Ticks, TaskId)>,
    admit_cursor: usize,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(processes: &[Process], params: S::Params) -> Result<Self, SimError> {
        process::validate(processes)?;

        let mut core = SchedCore::<S>::new(params);
        let mut by_arrival: Vec<TaskId> = processes
            .iter()
            .map(|p| core.ctx.create_task(p.id, p.arrival, p.burst))
            .collect();
        // Stable, so equal arrivals keep input order
        by_arrival.sort_by_key(|&task| core.ctx.task(task).arrival);

        let admissions = by_arrival
            .into_iter()
            .map(|task| {
                let admit_at = match S::ADMISSION {
                    Admission::OnArrival => core.ctx.task(task).arrival,
                    Admission::Upfront => 0,
                };
                (admit_at, task)
            })
            .collect();

        Ok(Self {
            core,
            admissions,
            admit_cursor: 0,
        })
    }

    /// Admits due arrivals, then runs one slice or idles until the next admission.
    pub fn step(&mut self) -> Result<Vec<SchedCoreEvent>, SimError> {
        let mut events = self.handle_arrivals();

        match self.core.run_slice() {
            Some(ran) => events.extend(ran),
            None => match self.next_admission() {
                Some(time) => events.push(self.core.idle_until(time)),
                None => return Err(SimError::Stalled { now: self.core.now() }),
            },
        }

        Ok(events)
    }

    fn handle_arrivals(&mut self) -> Vec<SchedCoreEvent> {
        let now = self.core.now();
        let mut events = Vec::new();

        // Contiguous, since admissions are sorted
        while let Some(&(admit_at, task)) = self.admissions.get(self.admit_cursor) {
            if admit_at > now {
                break;
            }
            events.push(self.core.wake_task(task));
            self.admit_cursor += 1;
        }

        events
    }

    fn next_admission(&self) -> Option<Ticks> {
        self.admissions
            .get(self.admit_cursor)
            .map(|&(admit_at, _)| admit_at)
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.ctx.all_completed()
    }

    /// Steps until every process has completed.
    pub fn run(mut self) -> Result<Schedule, SimError> {
        while !self.all_jobs_completed() {
            for event in self.step()? {
                log::trace!("t={} {:?}", self.core.now(), event);
            }
        }
        log::debug!(
            "{}: finished at t={} after {} slices",
            S::NAME,
            self.core.now(),
            self.core.observer().steps()
        );

        let (ctx, timeline) = self.core.into_parts();
        let metrics = ctx
            .tasks
            .iter()
            .map(|task| ProcessMetrics::derive(task).ok_or(SimError::Stalled { now: ctx.now }))
            .collect::<Result<_, _>>()?;

        Ok(Schedule {
            policy: S::NAME,
            timeline,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::TaskState,
        error::InputError,
        scheduler::{FcfsScheduler, Quantum, RoundRobinScheduler, SrtScheduler},
    };

    #[test]
    fn empty_input_is_rejected_before_running() {
        let err = Sim::<FcfsScheduler>::new(&[], ()).err();
        assert_eq!(err, Some(SimError::InvalidInput(InputError::Empty)));
    }

    #[test]
    fn idle_step_jumps_to_next_arrival() {
        let mut sim = Sim::<FcfsScheduler>::new(&Process::numbered(&[(3, 1)]), ()).unwrap();

        let events = sim.step().unwrap();
        assert_eq!(events, vec![SchedCoreEvent::CpuIdle { from: 0, to: 3 }]);

        let events = sim.step().unwrap();
        assert!(events.contains(&SchedCoreEvent::Ran {
            task: 0,
            start: 3,
            end: 4
        }));
        assert!(sim.all_jobs_completed());
    }

    #[test]
    fn upfront_admission_queues_everything_at_start() {
        let quantum = Quantum::new(1).unwrap();
        let mut sim =
            Sim::<RoundRobinScheduler>::new(&Process::numbered(&[(0, 2), (9, 1)]), quantum)
                .unwrap();

        let events = sim.step().unwrap();
        let woken = events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    SchedCoreEvent::TaskStateChange {
                        to: TaskState::Runnable,
                        from: TaskState::Pending,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(woken, 2);
    }

    #[test]
    fn preempted_task_is_requeued() {
        let mut sim = Sim::<SrtScheduler>::new(&Process::numbered(&[(0, 2)]), ()).unwrap();

        let events = sim.step().unwrap();
        assert_eq!(
            events.last(),
            Some(&SchedCoreEvent::TaskStateChange {
                task: 0,
                from: TaskState::Running,
                to: TaskState::Runnable
            })
        );
        assert_eq!(sim.core.ctx.task(0).state, TaskState::Runnable);
        assert!(sim.core.ctx.task_to_dsq.contains_key(&0));
    }
}
