//! Cooperative timer queue driven by a virtual millisecond clock.
//!
//! Nothing here sleeps.  The host calls `pop_due` with the current time and
//! runs each returned task to completion before asking for the next, so
//! tasks never overlap.  Every task carries the epoch it was scheduled in;
//! `advance_epoch` invalidates everything pending at once, and stale tasks
//! are dropped on the way out instead of firing into a newer round.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::trace;

pub const SPAWN_INTERVAL_MS: u64 = 500;
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;
/// ≈60 FPS.
pub const MOTION_INTERVAL_MS: u64 = 16;
pub const LASER_FLASH_MS: u64 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Spawn,
    Countdown,
    Motion,
    LaserHide,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub kind: TaskKind,
    pub due_ms: u64,
    /// `Some` for repeating tasks.
    pub period_ms: Option<u64>,
    pub epoch: u64,
    seq: u64,
}

impl Ord for Task {
    fn cmp(&self, other: &Self) -> Ordering {
        // Earliest first; ties fire in scheduling order.
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Task>>,
    epoch: u64,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Start a new epoch.  Every task scheduled before this call is dead.
    pub fn advance_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Repeat `kind` every `period_ms`, first firing one period from `now_ms`.
    pub fn schedule_every(&mut self, kind: TaskKind, now_ms: u64, period_ms: u64) {
        // A zero period would never let the clock move past `now_ms`.
        let period_ms = period_ms.max(1);
        self.push(kind, now_ms + period_ms, Some(period_ms));
    }

    pub fn schedule_once(&mut self, kind: TaskKind, now_ms: u64, delay_ms: u64) {
        self.push(kind, now_ms + delay_ms, None);
    }

    fn push(&mut self, kind: TaskKind, due_ms: u64, period_ms: Option<u64>) {
        let task = Task {
            kind,
            due_ms,
            period_ms,
            epoch: self.epoch,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(task));
    }

    /// Drop every pending task of `kind`.  Safe when there are none.
    pub fn cancel(&mut self, kind: TaskKind) {
        self.queue.retain(|Reverse(t)| t.kind != kind);
    }

    /// Number of live (current-epoch) tasks of `kind`.
    pub fn pending(&self, kind: TaskKind) -> usize {
        self.queue
            .iter()
            .filter(|Reverse(t)| t.kind == kind && t.epoch == self.epoch)
            .count()
    }

    /// Next live task due at or before `now_ms`.  Repeating tasks are
    /// re-armed for their following period before being returned.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Task> {
        loop {
            match self.queue.peek() {
                Some(Reverse(t)) if t.due_ms <= now_ms => {}
                _ => return None,
            }
            let Reverse(task) = self.queue.pop()?;

            if task.epoch != self.epoch {
                trace!(kind = ?task.kind, epoch = task.epoch, "dropping stale task");
                continue;
            }

            if let Some(period) = task.period_ms {
                self.queue.push(Reverse(Task {
                    due_ms: task.due_ms + period,
                    seq: self.next_seq,
                    ..task.clone()
                }));
                self.next_seq += 1;
            }
            return Some(task);
        }
    }
}
