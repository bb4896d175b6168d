use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;

// Index into Task Vec; equal to the process's position in the input
pub type TaskId = usize;
pub type ProcessId = u64;
pub type Ticks = u64;
new_key_type! {
    pub struct DsqId;
}

/// Ordering of tasks on a priority DSQ: least remaining service first,
/// then earliest arrival, then input order.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct ReadyKey {
    pub remaining: Ticks,
    pub arrival: Ticks,
    pub order: TaskId,
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop ReadyKey's Ord
impl PartialOrd for ReadyKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReadyKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.remaining, other.arrival, other.order).cmp(&(
            self.remaining,
            self.arrival,
            self.order,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    // Not yet handed to the scheduler
    Pending,
    Runnable,
    Running,
    Completed,
}

#[derive(Debug)]
pub struct Task {
    pub id: TaskId,
    pub pid: ProcessId,
    pub state: TaskState,
    pub arrival: Ticks,
    pub required_service: Ticks,
    pub consumed_service: Ticks,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Task {
    pub fn remaining(&self) -> Ticks {
        self.required_service - self.consumed_service
    }

    pub fn ready_key(&self) -> ReadyKey {
        ReadyKey {
            remaining: self.remaining(),
            arrival: self.arrival,
            order: self.id,
        }
    }
}

#[derive(Debug)]
pub enum Dsq {
    Fifo {
        tasks: VecDeque<TaskId>,
    },
    Priq {
        tasks: KeyedPriorityQueue<TaskId, ReadyKey>,
    },
}

impl Dsq {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            tasks: VecDeque::new(),
        }
    }

    pub fn new_priq() -> Self {
        Self::Priq {
            tasks: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        match self {
            Self::Fifo { tasks } => tasks.contains(&task_id),
            Self::Priq { tasks } => tasks.iter().any(|t| *t.0 == task_id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { tasks } => tasks.len(),
            Self::Priq { tasks } => tasks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All mutable state of one simulation run on a single CPU.
#[derive(Debug)]
pub struct KernelCtx {
    pub now: Ticks,
    pub current: Option<TaskId>,
    pub tasks: Vec<Task>,
    pub dsqs: SlotMap<DsqId, Dsq>,
    pub task_to_dsq: FxHashMap<TaskId, DsqId>,
}

impl KernelCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            current: None,
            tasks: Vec::new(),
            dsqs: SlotMap::with_key(),
            task_to_dsq: FxHashMap::default(),
        }
    }

    pub fn create_task(
        &mut self,
        pid: ProcessId,
        arrival: Ticks,
        required_service: Ticks,
    ) -> TaskId {
        let id = self.tasks.len();

        let task = Task {
            id,
            pid,
            state: TaskState::Pending,
            arrival,
            required_service,
            consumed_service: 0,
            first_run: None,
            completion_time: None,
        };

        self.tasks.push(task);
        id
    }

    // Validated workloads finish by max(arrival) + sum(burst), which fits in Ticks
    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self
            .now
            .checked_add(delta)
            .expect("Clock overflowed past Ticks::MAX");
    }

    pub fn advance_to(&mut self, time: Ticks) {
        debug_assert!(time >= self.now, "Clock cannot move backwards");
        self.now = self.now.max(time);
    }

    pub fn create_dsq_fifo(&mut self) -> DsqId {
        self.dsqs.insert(Dsq::new_fifo())
    }

    pub fn create_dsq_priq(&mut self) -> DsqId {
        self.dsqs.insert(Dsq::new_priq())
    }

    /// Appends to a FIFO DSQ, or inserts with the task's current
    /// `ReadyKey` on a priority DSQ.
    pub fn dsq_push(&mut self, dsq_id: DsqId, task_id: TaskId) {
        assert!(
            !self.task_to_dsq.contains_key(&task_id),
            "Task {task_id} already present in some DSQ"
        );

        let task = self.task(task_id);
        debug_assert!(
            task.state == TaskState::Runnable,
            "Task {task_id} must be Runnable when enqueued"
        );

        let key = task.ready_key();
        let dsq = self.dsqs.get_mut(dsq_id).expect("Unknown DSQ");

        match dsq {
            Dsq::Fifo { tasks } => tasks.push_back(task_id),
            Dsq::Priq { tasks } => {
                tasks.push(task_id, key);
            }
        };

        self.task_to_dsq.insert(task_id, dsq_id);
    }

    pub fn dsq_pop(&mut self, dsq_id: DsqId) -> Option<TaskId> {
        let dsq = self.dsqs.get_mut(dsq_id)?;
        let task = match dsq {
            Dsq::Fifo { tasks } => tasks.pop_front(),
            Dsq::Priq { tasks } => tasks.pop().map(|t| t.0),
        }?;

        let removed = self.task_to_dsq.remove(&task);
        debug_assert!(removed.is_some(), "Task {task} missing DSQ membership");

        Some(task)
    }

    pub fn dsq_len(&self, dsq_id: DsqId) -> usize {
        self.dsqs.get(dsq_id).map_or(0, Dsq::len)
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn all_completed(&self) -> bool {
        self.tasks
            .iter()
            .all(|task| task.state == TaskState::Completed)
    }

    pub fn mark_runnable(&mut self, task_id: TaskId) {
        let task = self.task_mut(task_id);
        debug_assert!(
            task.state != TaskState::Completed,
            "Completed task {} cannot be runnable",
            task.id
        );
        task.state = TaskState::Runnable;
    }

    pub fn mark_completed(&mut self, task_id: TaskId, completion_time: Ticks) {
        debug_assert!(
            !self.task_to_dsq.contains_key(&task_id),
            "Completing task {} that is still enqueued",
            task_id
        );

        let task = &mut self.tasks[task_id];
        debug_assert!(
            task.state == TaskState::Running,
            "Task {task_id} must have been running before marked complete"
        );
        debug_assert_eq!(
            task.consumed_service, task.required_service,
            "Task {task_id} completed with service outstanding"
        );

        task.state = TaskState::Completed;
        task.completion_time = Some(completion_time);
    }

    // Return previous state
    pub fn set_running(&mut self, task_id: TaskId) -> TaskState {
        debug_assert!(
            !self.task_to_dsq.contains_key(&task_id),
            "Running task {task_id} must not be enqueued"
        );
        debug_assert!(self.current.is_none(), "CPU already running a task");

        self.current = Some(task_id);
        let now = self.now;
        let task = self.task_mut(task_id);
        let prev_state = task.state;
        task.state = TaskState::Running;
        task.first_run.get_or_insert(now);
        prev_state
    }

    pub fn clear_cpu(&mut self) {
        self.current = None;
    }
}

impl Default for KernelCtx {
    fn default() -> Self {
        Self::new()
    }
}
