//! Scroll state and fling physics
//!
//! One `ScrollEngine` tracks the strip's single horizontal offset through
//! the drag → fling → settle cycle. Fling deceleration is an exponential
//! friction curve integrated in closed form against wall-clock time, so a
//! frame tick at any rate lands on the same trajectory.

use crate::error::SelectorError;

/// Debounce window for duplicate settle reports.
pub const SETTLE_DEBOUNCE_MS: u64 = 200;

/// A fling that comes to rest within this long of its last movement is a
/// "quick fling end" and forces a terminal report even if the offset is
/// unchanged.
pub const QUICK_FLING_WINDOW_MS: u64 = 100;

/// Friction time constant: velocity decays by e⁻¹ every 325 ms.
const FLING_TIME_CONSTANT_MS: f32 = 325.0;

/// Speed (px/ms) below which a fling is considered finished.
const MIN_FLING_SPEED: f32 = 0.02;

/// Where the engine is in the drag/fling lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Idle,
    Dragging,
    Flinging,
    /// Movement stopped; one terminal settle report is pending.
    Settling,
}

/// Terminal report produced when scrolling comes to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settle {
    /// Fully-clamped final offset.
    pub offset: f32,
    /// The rest followed a fling within [`QUICK_FLING_WINDOW_MS`].
    pub quick: bool,
}

/// Exponential-friction deceleration curve.
#[derive(Debug, Clone, Copy)]
struct Fling {
    origin: f32,
    /// Signed initial velocity in px/ms.
    velocity: f32,
    start_ms: u64,
    min: f32,
    max: f32,
}

impl Fling {
    /// Position and velocity `now_ms` into the curve.
    fn sample(&self, now_ms: u64) -> (f32, f32) {
        let t = now_ms.saturating_sub(self.start_ms) as f32;
        let decay = (-t / FLING_TIME_CONSTANT_MS).exp();
        let position = self.origin + self.velocity * FLING_TIME_CONSTANT_MS * (1.0 - decay);
        (position, self.velocity * decay)
    }
}

/// Tracks `current_offset`, applies drags, runs fling deceleration, and
/// clamps every mutation into the viewport's valid range.
#[derive(Debug)]
pub struct ScrollEngine {
    offset: f32,
    /// Last offset known to satisfy `0 ≤ offset ≤ max_offset`; substituted
    /// for rendering whenever the live offset is out of range.
    last_valid: f32,
    max_offset: f32,
    phase: ScrollPhase,
    fling: Option<Fling>,
    last_move_ms: u64,
    settle_from_fling: bool,
}

impl Default for ScrollEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollEngine {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            last_valid: 0.0,
            max_offset: 0.0,
            phase: ScrollPhase::Idle,
            fling: None,
            last_move_ms: 0,
            settle_from_fling: false,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn set_max_offset(&mut self, max_offset: f32) {
        self.max_offset = max_offset.max(0.0);
        self.note_valid();
    }

    /// Offset safe to hand to the renderer: the live offset when in range,
    /// otherwise the last known-good one.
    pub fn render_offset(&self) -> f32 {
        if self.is_valid(self.offset) {
            self.offset
        } else {
            let err = SelectorError::OutOfRange {
                offset: self.offset,
                max: self.max_offset,
            };
            log::debug!("{}; rendering last valid {}", err, self.last_valid);
            self.last_valid
        }
    }

    fn is_valid(&self, offset: f32) -> bool {
        offset >= 0.0 && (self.max_offset <= 0.0 || offset <= self.max_offset)
    }

    fn note_valid(&mut self) {
        if self.is_valid(self.offset) {
            self.last_valid = self.offset;
        }
    }

    /// Pointer went down: abort any in-flight fling and start dragging.
    pub fn begin_drag(&mut self) {
        self.fling = None;
        self.phase = ScrollPhase::Dragging;
    }

    /// Apply a finger movement. Content moves opposite to the finger.
    pub fn drag_by(&mut self, delta_x: f32) {
        self.offset -= delta_x;
        self.note_valid();
    }

    /// Unconditional lower clamp, applied after every pointer event.
    pub fn clamp_floor(&mut self) {
        if self.offset < 0.0 {
            self.offset = 0.0;
            self.note_valid();
        }
    }

    /// Pointer lifted with `velocity` px/ms (signed, already in content
    /// direction). Non-zero velocity starts a fling bounded by
    /// `[0, fling_max]`; zero goes straight to settling.
    pub fn end_drag(&mut self, velocity: f32, now_ms: u64, fling_max: f32) {
        self.last_move_ms = now_ms;
        if velocity.abs() > MIN_FLING_SPEED {
            self.fling = Some(Fling {
                origin: self.offset,
                velocity,
                start_ms: now_ms,
                min: 0.0,
                max: fling_max,
            });
            self.phase = ScrollPhase::Flinging;
        } else {
            self.settle_from_fling = false;
            self.phase = ScrollPhase::Settling;
        }
    }

    /// Drop out of dragging without a fling (pointer cancel).
    pub fn abort_drag(&mut self) {
        self.fling = None;
        if self.phase == ScrollPhase::Dragging {
            self.phase = ScrollPhase::Idle;
        }
    }

    /// Advance fling physics to `now_ms`. Returns whether the offset moved.
    pub fn animate(&mut self, now_ms: u64) -> bool {
        if self.phase != ScrollPhase::Flinging {
            return false;
        }
        let Some(fling) = self.fling else {
            self.phase = ScrollPhase::Idle;
            return false;
        };
        let (position, velocity) = fling.sample(now_ms);
        let moved = (position - self.offset).abs() > f32::EPSILON;
        self.offset = position;

        let hit_bound = self.offset <= fling.min || self.offset >= fling.max;
        if hit_bound {
            self.offset = self.offset.clamp(fling.min, fling.max);
        }
        self.note_valid();
        if moved {
            self.last_move_ms = now_ms;
        }

        if hit_bound || velocity.abs() < MIN_FLING_SPEED {
            self.fling = None;
            self.settle_from_fling = true;
            self.phase = ScrollPhase::Settling;
        }
        moved
    }

    /// Initial velocity of the in-flight fling, 0 when not flinging.
    /// The sign gives the content direction for report gating.
    pub fn fling_velocity(&self) -> f32 {
        self.fling.map(|f| f.velocity).unwrap_or(0.0)
    }

    /// Collect the pending terminal settle, clamping the final offset.
    pub fn take_settled(&mut self, now_ms: u64) -> Option<Settle> {
        if self.phase != ScrollPhase::Settling {
            return None;
        }
        self.offset = if self.max_offset > 0.0 {
            self.offset.clamp(0.0, self.max_offset)
        } else {
            self.offset.max(0.0)
        };
        self.last_valid = self.offset;
        self.phase = ScrollPhase::Idle;
        let quick = self.settle_from_fling
            && now_ms.saturating_sub(self.last_move_ms) <= QUICK_FLING_WINDOW_MS;
        self.settle_from_fling = false;
        Some(Settle {
            offset: self.offset,
            quick,
        })
    }

    /// Jump directly to `target` (programmatic seek). Clamped into range;
    /// does not disturb an idle phase.
    pub fn seek(&mut self, target: f32) {
        self.offset = if self.max_offset > 0.0 {
            target.clamp(0.0, self.max_offset)
        } else {
            target.max(0.0)
        };
        self.note_valid();
    }

    /// Reset to the origin (dispose).
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.last_valid = 0.0;
        self.fling = None;
        self.phase = ScrollPhase::Idle;
        self.settle_from_fling = false;
        self.last_move_ms = 0;
    }
}
