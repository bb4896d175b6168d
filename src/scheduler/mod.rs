pub mod fcfs;
pub mod rr;
pub mod sjf;
pub mod srt;

use crate::core::{
    Ticks,
    state::{KernelCtx, TaskId},
};
pub use fcfs::FcfsScheduler;
pub use rr::{Quantum, RoundRobinScheduler};
pub use sjf::SjfScheduler;
pub use srt::SrtScheduler;

pub type EnqueueFlags = u64;

pub const SCHED_ENQ_WAKEUP: EnqueueFlags = 1 << 0;
pub const SCHED_ENQ_PREEMPT: EnqueueFlags = 1 << 1;

pub const DEFAULT_QUANTUM: Ticks = 2;

/// When the simulation driver hands a process to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    // Enqueued once the clock reaches its arrival time
    OnArrival,
    // Every process enqueued at t=0, ordered by arrival
    Upfront,
}

/// Run `task` for up to `slice` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub task: TaskId,
    pub slice: Ticks,
}

pub trait Scheduler {
    const NAME: &'static str;
    const ADMISSION: Admission = Admission::OnArrival;
    // Merge back-to-back slices of the same process into one segment
    const COALESCE: bool = false;

    type Params;

    fn init(ctx: &mut KernelCtx, params: Self::Params) -> Self;

    fn enqueue(&mut self, ctx: &mut KernelCtx, task: TaskId, flags: EnqueueFlags);

    /// Picks the next task for the idle CPU, or `None` to leave it idle.
    fn dispatch(&mut self, ctx: &mut KernelCtx) -> Option<Dispatch>;
}
