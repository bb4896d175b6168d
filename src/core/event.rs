use crate::core::{TaskId, TaskState, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCoreEvent {
    TaskStateChange {
        task: TaskId,
        from: TaskState,
        to: TaskState,
    },
    // Task held the CPU for [start, end)
    Ran {
        task: TaskId,
        start: Ticks,
        end: Ticks,
    },
    // CPU idle until the next task is available
    CpuIdle {
        from: Ticks,
        to: Ticks,
    },
}
