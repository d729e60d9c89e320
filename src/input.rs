//! Tap-versus-drag classification for a single pointer gesture.
//!
//! A gesture is a `begin`, any number of moves, then an `end`.  Moves only
//! reposition the gun, so they are handled by the session; this tracker only
//! needs the start point to judge the end.

/// A gesture shorter than this (ms) may be a tap...
pub const TAP_MAX_DURATION_MS: u64 = 200;
/// ...provided the pointer also moved less than this many pixels.
pub const TAP_MAX_MOVEMENT: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// Quick and still: fire.
    Tap,
    /// Anything else: the gun was only moved.
    Drag,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Touch {
    x: f32,
    at_ms: u64,
}

#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    touch: Option<Touch>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, x: f32, at_ms: u64) {
        self.touch = Some(Touch { x, at_ms });
    }

    pub fn is_active(&self) -> bool {
        self.touch.is_some()
    }

    /// Finish the gesture.  An `end` without a `begin` counts as a drag.
    pub fn end(&mut self, x: f32, at_ms: u64) -> Gesture {
        match self.touch.take() {
            Some(touch) => classify(at_ms.saturating_sub(touch.at_ms), (x - touch.x).abs()),
            None => Gesture::Drag,
        }
    }

    pub fn cancel(&mut self) {
        self.touch = None;
    }
}

pub fn classify(duration_ms: u64, movement: f32) -> Gesture {
    if duration_ms < TAP_MAX_DURATION_MS && movement < TAP_MAX_MOVEMENT {
        Gesture::Tap
    } else {
        Gesture::Drag
    }
}
