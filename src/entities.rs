//! All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundStatus {
    /// Before the first round, or after a reset.
    Idle,
    Running,
    /// The countdown reached zero.  Timers are stopped.
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Screen size in logical pixels, fixed for the whole session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

// ── Bubbles, gun & laser ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    /// Unique within a round, assigned from 1 upwards.
    pub id: u32,
    /// Left edge.
    pub x: f32,
    /// Top edge.  Decreases as the bubble rises.
    pub y: f32,
    pub radius: f32,
}

impl Bubble {
    pub fn center_x(&self) -> f32 {
        self.x + self.radius
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gun {
    /// Left edge, always within `0 ..= playfield.width - width`.
    pub position_x: f32,
    pub width: f32,
}

impl Gun {
    /// The x-coordinate the laser is fired from.
    pub fn center_x(&self) -> f32 {
        self.position_x + self.width / 2.0
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Laser {
    pub visible: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub bubbles: Vec<Bubble>,
    pub gun: Gun,
    pub laser: Laser,
    pub score: u32,
    pub time_remaining: u32,
    pub status: RoundStatus,
    /// Id handed to the next spawned bubble.
    pub next_bubble_id: u32,
    pub playfield: Playfield,
    /// Maximum live bubbles, or `None` for no limit.
    pub bubble_cap: Option<usize>,
}

/// Read-only view handed to the renderer after every change.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub bubbles: Vec<Bubble>,
    pub gun_position_x: f32,
    pub gun_width: f32,
    pub laser_visible: bool,
    pub score: u32,
    pub time_remaining: u32,
    pub started: bool,
    pub over: bool,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Snapshot {
            bubbles: state.bubbles.clone(),
            gun_position_x: state.gun.position_x,
            gun_width: state.gun.width,
            laser_visible: state.laser.visible,
            score: state.score,
            time_remaining: state.time_remaining,
            started: state.status != RoundStatus::Idle,
            over: state.status == RoundStatus::GameOver,
        }
    }
}
