//! The round state machine: `Idle → Running → GameOver`, with `reset`
//! returning to `Idle` from anywhere.
//!
//! `GameSession` owns every piece of mutable game data: the `GameState`,
//! the timer queue, the in-flight gesture and the RNG.  Pointer events and
//! `advance` are the only ways in, and each one runs to completion.

use rand::Rng;
use tracing::{debug, info};

use crate::compute::{
    advance_bubbles, begin_round, countdown, fire_laser, hide_laser, init_state, reposition_gun,
    reset_round, spawn_bubble,
};
use crate::entities::{GameState, Playfield, RoundStatus, Snapshot};
use crate::input::{Gesture, GestureTracker};
use crate::scheduler::{
    Scheduler, Task, TaskKind, COUNTDOWN_INTERVAL_MS, LASER_FLASH_MS, MOTION_INTERVAL_MS,
    SPAWN_INTERVAL_MS,
};

pub struct GameSession<R: Rng> {
    state: GameState,
    scheduler: Scheduler,
    gesture: GestureTracker,
    rng: R,
    /// Latest time seen from the host, in ms.
    now_ms: u64,
}

impl<R: Rng> GameSession<R> {
    pub fn new(playfield: Playfield, bubble_cap: Option<usize>, rng: R) -> Self {
        GameSession {
            state: init_state(playfield, bubble_cap),
            scheduler: Scheduler::new(),
            gesture: GestureTracker::new(),
            rng,
            now_ms: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    // ── Round lifecycle ──────────────────────────────────────────────────────

    /// Begin a round.  Ignored while one is already running.
    pub fn start(&mut self, now_ms: u64) {
        if self.state.status == RoundStatus::Running {
            debug!("start ignored: round already running");
            return;
        }
        self.tick_clock(now_ms);

        let epoch = self.scheduler.advance_epoch();
        self.gesture.cancel();
        self.state = begin_round(&self.state);

        let now = self.now_ms;
        self.scheduler
            .schedule_every(TaskKind::Spawn, now, SPAWN_INTERVAL_MS);
        self.scheduler
            .schedule_every(TaskKind::Countdown, now, COUNTDOWN_INTERVAL_MS);
        self.scheduler
            .schedule_every(TaskKind::Motion, now, MOTION_INTERVAL_MS);
        info!(epoch, at_ms = now, "round started");
    }

    /// Stop everything and go back to `Idle`.  Valid in any state.
    pub fn reset(&mut self) {
        let epoch = self.scheduler.advance_epoch();
        self.gesture.cancel();
        self.state = reset_round(&self.state);
        info!(epoch, "round reset");
    }

    fn end_round(&mut self) {
        self.scheduler.cancel(TaskKind::Spawn);
        self.scheduler.cancel(TaskKind::Countdown);
        self.scheduler.cancel(TaskKind::Motion);
        self.gesture.cancel();
        info!(score = self.state.score, "round over");
    }

    // ── Pointer input ────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f32, at_ms: u64) {
        if self.state.status != RoundStatus::Running {
            return;
        }
        self.tick_clock(at_ms);
        self.gesture.begin(x, at_ms);
        self.state = reposition_gun(&self.state, x);
    }

    pub fn pointer_move(&mut self, x: f32) {
        if self.state.status != RoundStatus::Running || !self.gesture.is_active() {
            return;
        }
        self.state = reposition_gun(&self.state, x);
    }

    /// Finish a gesture, firing if it was a tap.  Returns the classification.
    pub fn pointer_up(&mut self, x: f32, at_ms: u64) -> Gesture {
        let gesture = self.gesture.end(x, at_ms);
        if self.state.status != RoundStatus::Running {
            return Gesture::Drag;
        }
        self.tick_clock(at_ms);
        if gesture == Gesture::Tap {
            self.fire();
        }
        gesture
    }

    /// Fire from the gun's current centre.
    pub fn fire(&mut self) {
        if self.state.status != RoundStatus::Running {
            return;
        }
        let laser_x = self.state.gun.center_x();
        self.state = fire_laser(&self.state, laser_x);

        // Re-flash: a newer shot postpones the pending hide.
        self.scheduler.cancel(TaskKind::LaserHide);
        self.scheduler
            .schedule_once(TaskKind::LaserHide, self.now_ms, LASER_FLASH_MS);
    }

    // ── Clock ────────────────────────────────────────────────────────────────

    /// Run every task due up to `now_ms`, oldest first.  Returns `true` if
    /// any of them touched the state.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        self.tick_clock(now_ms);
        let mut changed = false;
        while let Some(task) = self.scheduler.pop_due(self.now_ms) {
            self.run_task(&task);
            changed = true;
        }
        changed
    }

    fn run_task(&mut self, task: &Task) {
        match task.kind {
            TaskKind::Spawn => {
                self.state = spawn_bubble(&self.state, &mut self.rng);
            }
            TaskKind::Motion => {
                self.state = advance_bubbles(&self.state);
            }
            TaskKind::Countdown => {
                self.state = countdown(&self.state);
                if self.state.status == RoundStatus::GameOver {
                    self.end_round();
                }
            }
            TaskKind::LaserHide => {
                self.state = hide_laser(&self.state);
            }
        }
    }

    fn tick_clock(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
