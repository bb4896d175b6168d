pub mod driver;
pub mod event;
pub mod observer;
pub mod state;
pub mod timeline;

pub use driver::SchedCore;
pub use event::SchedCoreEvent;
pub use state::{Dsq, DsqId, KernelCtx, ProcessId, ReadyKey, Task, TaskId, TaskState, Ticks};
pub use timeline::{Segment, Timeline};
