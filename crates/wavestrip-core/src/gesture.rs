//! Pointer gesture classification
//!
//! A plain event-consuming state machine over one active pointer: the host
//! owns the actual event subscription and feeds [`PointerEvent`]s in. The
//! classifier applies drags to the [`ScrollEngine`], computes the release
//! velocity, and reports which callbacks the controller should fire as a
//! [`GestureOutcome`] — it never calls listeners itself.

use crate::scroll::ScrollEngine;

/// Finger travel below this many pixels classifies as no movement.
pub const DIRECTION_SLOP_PX: f32 = 1.0;

/// Velocity samples older than this are dropped from the estimate.
const VELOCITY_WINDOW_MS: u64 = 100;

/// One pointer event in strip-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerEvent {
    pub fn down(x: f32, timestamp_ms: u64) -> Self {
        Self { kind: PointerKind::Down, x, timestamp_ms }
    }

    pub fn moved(x: f32, timestamp_ms: u64) -> Self {
        Self { kind: PointerKind::Move, x, timestamp_ms }
    }

    pub fn up(x: f32, timestamp_ms: u64) -> Self {
        Self { kind: PointerKind::Up, x, timestamp_ms }
    }

    pub fn cancel(x: f32, timestamp_ms: u64) -> Self {
        Self { kind: PointerKind::Cancel, x, timestamp_ms }
    }
}

/// Instantaneous finger movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragDirection {
    #[default]
    Unknown,
    Left,
    Right,
}

/// What the controller should do after one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureOutcome {
    /// Drag moved past the slop: drop the highlight overlay.
    pub clear_highlight: bool,
    /// Fire `on_changing` with the current offset's time.
    pub changing: bool,
    /// The offset crossed `max_offset` during this drag.
    pub limit_crossed: bool,
    /// Pointer was cancelled: fire `on_select` immediately, no fling.
    pub select_now: bool,
    /// The strip needs a redraw.
    pub redraw: bool,
}

/// Sliding-window estimate of pointer velocity.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: Vec<(f32, u64)>,
}

impl VelocityTracker {
    pub fn add_movement(&mut self, x: f32, timestamp_ms: u64) {
        self.samples.push((x, timestamp_ms));
        let cutoff = timestamp_ms.saturating_sub(VELOCITY_WINDOW_MS);
        self.samples.retain(|&(_, t)| t >= cutoff);
    }

    /// Pixels travelled per `unit_ms`, signed in finger direction.
    pub fn velocity(&self, unit_ms: u32) -> f32 {
        let (Some(&(x0, t0)), Some(&(x1, t1))) = (self.samples.first(), self.samples.last())
        else {
            return 0.0;
        };
        if t1 <= t0 {
            return 0.0;
        }
        (x1 - x0) / (t1 - t0) as f32 * unit_ms as f32
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Classifies one pointer-down → up/cancel cycle and drives the engine.
#[derive(Debug)]
pub struct GestureClassifier {
    dragging: bool,
    down_x: f32,
    last_x: f32,
    direction: DragDirection,
    tracker: VelocityTracker,
    velocity_unit_ms: u32,
}

impl GestureClassifier {
    pub fn new(velocity_unit_ms: u32) -> Self {
        Self {
            dragging: false,
            down_x: 0.0,
            last_x: 0.0,
            direction: DragDirection::Unknown,
            tracker: VelocityTracker::default(),
            velocity_unit_ms,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn direction(&self) -> DragDirection {
        self.direction
    }

    /// Consume one pointer event against the engine.
    ///
    /// `fling_max` bounds a handed-off fling (content width plus pads).
    pub fn handle(
        &mut self,
        event: PointerEvent,
        engine: &mut ScrollEngine,
        fling_max: f32,
    ) -> GestureOutcome {
        let mut outcome = GestureOutcome::default();
        match event.kind {
            PointerKind::Down => {
                self.tracker.clear();
                self.tracker.add_movement(event.x, event.timestamp_ms);
                engine.begin_drag();
                self.dragging = true;
                self.down_x = event.x;
                self.last_x = event.x;
                self.direction = DragDirection::Unknown;
                outcome.redraw = true;
            }
            PointerKind::Move => {
                if !self.dragging {
                    return outcome;
                }
                self.tracker.add_movement(event.x, event.timestamp_ms);
                let delta = event.x - self.last_x;
                engine.drag_by(delta);
                self.last_x = event.x;
                self.direction = if delta >= DIRECTION_SLOP_PX {
                    DragDirection::Right
                } else if delta < -DIRECTION_SLOP_PX {
                    DragDirection::Left
                } else {
                    DragDirection::Unknown
                };
                if (event.x - self.down_x).abs() > DIRECTION_SLOP_PX {
                    outcome.clear_highlight = true;
                    outcome.changing = true;
                }
                if engine.max_offset() > 0.0 && engine.offset() > engine.max_offset() {
                    outcome.limit_crossed = true;
                }
                outcome.redraw = true;
            }
            PointerKind::Up => {
                if !self.dragging {
                    return outcome;
                }
                self.tracker.add_movement(event.x, event.timestamp_ms);
                engine.drag_by(event.x - self.last_x);
                self.last_x = event.x;
                // Content flings opposite to the finger, in px/ms.
                let finger = self.tracker.velocity(self.velocity_unit_ms);
                let velocity = -finger / self.velocity_unit_ms as f32;
                engine.end_drag(velocity, event.timestamp_ms, fling_max);
                self.tracker.clear();
                self.dragging = false;
                outcome.redraw = true;
            }
            PointerKind::Cancel => {
                engine.abort_drag();
                self.tracker.clear();
                self.dragging = false;
                outcome.select_now = true;
                outcome.redraw = true;
            }
        }
        engine.clamp_floor();
        outcome
    }

    pub fn reset(&mut self) {
        self.dragging = false;
        self.direction = DragDirection::Unknown;
        self.tracker.clear();
    }
}
