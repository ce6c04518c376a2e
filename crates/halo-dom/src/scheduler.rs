//! Task Scheduler
//!
//! Single-threaded event loop: a microtask queue and virtual-clock timers.
//! Nothing runs until the embedder drains microtasks or advances time.

use std::collections::VecDeque;
use std::time::Duration;

use crate::Document;

/// Deferred callback
pub type Task = Box<dyn FnOnce(&mut Document)>;

/// Handle returned by `set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

struct Timer {
    id: TimerId,
    due: Duration,
    task: Task,
}

#[derive(Default)]
pub(crate) struct Scheduler {
    microtasks: VecDeque<Task>,
    /// Kept sorted by due time, ties in scheduling order
    timers: Vec<Timer>,
    now: Duration,
    next_timer_id: u64,
}

impl Scheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TimerId {
        self.next_timer_id += 1;
        let id = TimerId(self.next_timer_id);
        let due = self.now + delay;
        let pos = self.timers.partition_point(|t| t.due <= due);
        self.timers.insert(pos, Timer { id, due, task });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    fn pop_due(&mut self, deadline: Duration) -> Option<Timer> {
        if self.timers.first().is_some_and(|t| t.due <= deadline) {
            Some(self.timers.remove(0))
        } else {
            None
        }
    }
}

impl Document {
    /// Queue a callback for the next microtask checkpoint
    pub fn queue_microtask(&mut self, task: impl FnOnce(&mut Document) + 'static) {
        self.scheduler.microtasks.push_back(Box::new(task));
    }

    /// Run microtasks until the queue is empty; returns how many ran
    pub fn run_microtasks(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.scheduler.microtasks.pop_front() {
            task(self);
            ran += 1;
        }
        ran
    }

    /// Schedule a callback after `delay` of virtual time
    pub fn set_timeout(&mut self, delay: Duration, task: impl FnOnce(&mut Document) + 'static) -> TimerId {
        self.scheduler.schedule(delay, Box::new(task))
    }

    /// Cancel a pending timer
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.scheduler.cancel(id)
    }

    /// Number of timers that have not fired yet
    pub fn pending_timers(&self) -> usize {
        self.scheduler.timers.len()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.scheduler.now
    }

    /// Advance the clock, firing due timers in order with a microtask
    /// checkpoint after each. Returns the number of timers fired.
    pub fn advance_time(&mut self, delta: Duration) -> usize {
        self.run_microtasks();
        let deadline = self.scheduler.now + delta;
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(deadline) {
            self.scheduler.now = timer.due;
            tracing::trace!("Timer {:?} fired at {:?}", timer.id, timer.due);
            (timer.task)(self);
            self.run_microtasks();
            fired += 1;
        }
        self.scheduler.now = deadline;
        fired
    }
}
