//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG and logging.
//! Whether a transition is allowed in the current `RoundStatus` is decided
//! by the session, not here.

use rand::Rng;
use tracing::debug;

use crate::entities::{Bubble, GameState, Gun, Laser, Playfield, RoundStatus};

// ── Tuning constants ─────────────────────────────────────────────────────────

pub const BUBBLE_RADIUS: f32 = 30.0;
pub const GUN_WIDTH: f32 = 60.0;
/// Pixels a bubble rises per motion frame.
pub const RISE_PER_FRAME: f32 = 2.0;
/// Bubbles at or above this y have fully left the top edge.
pub const CULL_Y: f32 = -60.0;
/// New bubbles appear this far above the bottom edge.
pub const SPAWN_OFFSET_FROM_BOTTOM: f32 = 100.0;
pub const ROUND_SECONDS: u32 = 120;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the pre-game state for a playfield.  The gun starts centred.
pub fn init_state(playfield: Playfield, bubble_cap: Option<usize>) -> GameState {
    GameState {
        bubbles: Vec::new(),
        gun: Gun {
            position_x: centered_gun_x(&playfield),
            width: GUN_WIDTH,
        },
        laser: Laser::default(),
        score: 0,
        time_remaining: ROUND_SECONDS,
        status: RoundStatus::Idle,
        next_bubble_id: 1,
        playfield,
        bubble_cap,
    }
}

/// Fresh round: clears the board, recentres the gun and enters `Running`.
pub fn begin_round(state: &GameState) -> GameState {
    GameState {
        gun: Gun {
            position_x: centered_gun_x(&state.playfield),
            ..state.gun.clone()
        },
        status: RoundStatus::Running,
        ..cleared(state)
    }
}

/// Back to `Idle`.  The gun stays wherever the player left it.
pub fn reset_round(state: &GameState) -> GameState {
    GameState {
        status: RoundStatus::Idle,
        ..cleared(state)
    }
}

fn cleared(state: &GameState) -> GameState {
    GameState {
        bubbles: Vec::new(),
        laser: Laser::default(),
        score: 0,
        time_remaining: ROUND_SECONDS,
        next_bubble_id: 1,
        ..state.clone()
    }
}

fn centered_gun_x(playfield: &Playfield) -> f32 {
    clamp_gun_x(playfield.width / 2.0, GUN_WIDTH, playfield)
}

// ── Gun ──────────────────────────────────────────────────────────────────────

/// Left edge for a gun whose centre should sit at `center_x`, clamped so the
/// whole gun stays on screen.
pub fn clamp_gun_x(center_x: f32, gun_width: f32, playfield: &Playfield) -> f32 {
    let max_x = (playfield.width - gun_width).max(0.0);
    (center_x - gun_width / 2.0).clamp(0.0, max_x)
}

pub fn reposition_gun(state: &GameState, center_x: f32) -> GameState {
    GameState {
        gun: Gun {
            position_x: clamp_gun_x(center_x, state.gun.width, &state.playfield),
            ..state.gun.clone()
        },
        ..state.clone()
    }
}

// ── Spawning & motion ────────────────────────────────────────────────────────

/// Append one bubble at a random column just above the bottom edge.
/// Does nothing when the bubble cap is reached.
pub fn spawn_bubble(state: &GameState, rng: &mut impl Rng) -> GameState {
    if let Some(cap) = state.bubble_cap {
        if state.bubbles.len() >= cap {
            return state.clone();
        }
    }

    let max_x = (state.playfield.width - 2.0 * BUBBLE_RADIUS).max(0.0);
    let bubble = Bubble {
        id: state.next_bubble_id,
        x: rng.gen_range(0.0..=max_x),
        y: state.playfield.height - SPAWN_OFFSET_FROM_BOTTOM,
        radius: BUBBLE_RADIUS,
    };
    debug!(id = bubble.id, x = bubble.x, "bubble spawned");

    let mut bubbles = state.bubbles.clone();
    bubbles.push(bubble);
    GameState {
        bubbles,
        next_bubble_id: state.next_bubble_id + 1,
        ..state.clone()
    }
}

/// One motion frame: every bubble rises, then those past the top are culled.
pub fn advance_bubbles(state: &GameState) -> GameState {
    let before = state.bubbles.len();
    let bubbles: Vec<Bubble> = state
        .bubbles
        .iter()
        .map(|b| Bubble {
            y: b.y - RISE_PER_FRAME,
            ..b.clone()
        })
        .filter(|b| b.y > CULL_Y)
        .collect();

    let culled = before - bubbles.len();
    if culled > 0 {
        debug!(culled, "bubbles escaped");
    }
    GameState {
        bubbles,
        ..state.clone()
    }
}

// ── Firing ───────────────────────────────────────────────────────────────────

/// A vertical laser at `laser_x` hits a bubble when it crosses the bubble's
/// horizontal span.  Height is irrelevant.
pub fn is_hit(bubble: &Bubble, laser_x: f32) -> bool {
    (bubble.center_x() - laser_x).abs() <= bubble.radius
}

/// Show the laser, pop every bubble it crosses and score one point each.
pub fn fire_laser(state: &GameState, laser_x: f32) -> GameState {
    let (hit, survivors): (Vec<Bubble>, Vec<Bubble>) = state
        .bubbles
        .iter()
        .cloned()
        .partition(|b| is_hit(b, laser_x));

    debug!(laser_x, hits = hit.len(), "laser fired");
    GameState {
        bubbles: survivors,
        laser: Laser { visible: true },
        score: state.score + hit.len() as u32,
        ..state.clone()
    }
}

pub fn hide_laser(state: &GameState) -> GameState {
    GameState {
        laser: Laser { visible: false },
        ..state.clone()
    }
}

// ── Countdown ────────────────────────────────────────────────────────────────

/// One second of round time.  Reaching zero ends the round.
pub fn countdown(state: &GameState) -> GameState {
    let remaining = state.time_remaining.saturating_sub(1);
    let status = if remaining == 0 {
        RoundStatus::GameOver
    } else {
        state.status
    };
    GameState {
        time_remaining: remaining,
        status,
        ..state.clone()
    }
}
