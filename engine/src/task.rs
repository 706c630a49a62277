//! Per-frame tasks.
//!
//! A task is a named update function run once per frame, in the order tasks
//! were added. Returning [`TaskStatus::Done`] removes the task.

use crate::clock::Clock;
use crate::scene::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Continue,
    Done,
}

/// What a task sees about the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskInfo {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Seconds since this task first ran.
    pub time: f32,
    pub frame: u64,
}

pub type TaskFn<S> = Box<dyn FnMut(&mut S, &mut World, &TaskInfo) -> TaskStatus>;

struct Task<S> {
    name: String,
    started_at: Option<f64>,
    func: TaskFn<S>,
}

pub struct TaskManager<S> {
    tasks: Vec<Task<S>>,
}

impl<S> Default for TaskManager<S> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<S> TaskManager<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&mut self, name: &str, func: F)
    where
        F: FnMut(&mut S, &mut World, &TaskInfo) -> TaskStatus + 'static,
    {
        log::debug!("Task added: {name}");
        self.tasks.push(Task {
            name: name.to_string(),
            started_at: None,
            func: Box::new(func),
        });
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.name != name);
        self.tasks.len() != before
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Runs every task once against the current clock.
    pub fn run(&mut self, state: &mut S, world: &mut World, clock: &Clock) {
        let now = clock.elapsed();
        self.tasks.retain_mut(|task| {
            let started_at = *task.started_at.get_or_insert(now);
            let info = TaskInfo {
                dt: clock.dt(),
                time: (now - started_at) as f32,
                frame: clock.frame_count(),
            };
            match (task.func)(state, world, &info) {
                TaskStatus::Continue => true,
                TaskStatus::Done => {
                    log::debug!("Task finished: {}", task.name);
                    false
                }
            }
        });
    }
}
