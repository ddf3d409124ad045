//! Interaction and physics engine for the wavestrip waveform selector
//!
//! Everything a scrollable waveform-selector widget does except drawing:
//! time↔pixel conversion, the visible-window (pagination) computation, the
//! drag/fling scroll physics with boundary clamping, the timer-driven
//! highlight playback animation, and the gesture state machine that turns
//! pointer events into callbacks.
//!
//! ## Architecture
//!
//! Following the state/view split used across the workspace:
//!
//! - **[`SelectorController`]**: the state machine the host owns. Feed it
//!   pointer events, frame ticks, and timer ticks; it fires listener
//!   callbacks and produces a [`RenderFrame`] per draw.
//! - **[`Scheduler`]**: injected timer abstraction. The engine never owns a
//!   thread; hosts deliver ticks back, so tests drive the whole machine
//!   with a hand-advanced clock ([`TimerWheel`]).
//! - **Renderer**: external. A renderer consumes [`RenderFrame`] bar rects
//!   and gradient fractions; the `wavestrip-widgets` crate ships an iced
//!   canvas implementation.
//!
//! ## Usage
//!
//! ```
//! use wavestrip_core::{
//!     PointerEvent, SelectorConfig, SelectorController, TimerWheel,
//! };
//!
//! let mut wheel = TimerWheel::new();
//! let mut selector = SelectorController::new(SelectorConfig::default());
//! selector.layout(720.0, 200.0, &mut wheel);
//! selector.set_data(&[40_000, 12_000, 63_000], &mut wheel);
//!
//! // Host event loop: pointer events, then a frame tick
//! selector.handle_pointer(PointerEvent::down(360.0, 0), &mut wheel);
//! selector.handle_pointer(PointerEvent::moved(340.0, 16), &mut wheel);
//! selector.handle_pointer(PointerEvent::up(330.0, 32), &mut wheel);
//! selector.on_frame(48);
//! for token in wheel.poll(48) {
//!     selector.handle_timer(token, 48, &mut wheel);
//! }
//! if selector.take_redraw() {
//!     let _frame = selector.frame();
//! }
//! ```

pub mod controller;
pub mod error;
pub mod gesture;
pub mod highlight;
pub mod sample;
pub mod scheduler;
pub mod scroll;
pub mod time_axis;
pub mod viewport;

pub use controller::{
    BarView, RenderFrame, SelectorConfig, SelectorController, SelectorListener,
};
pub use error::SelectorError;
pub use gesture::{DragDirection, GestureClassifier, PointerEvent, PointerKind, VelocityTracker};
pub use highlight::{HighlightPlayer, HIGHLIGHT_TICK_MS, RESUME_TOLERANCE_PX};
pub use sample::{Sample, SampleStore, FULL_SCALE, MIN_DISPLAY_PERCENT};
pub use scheduler::{Scheduler, TimerToken, TimerWheel};
pub use scroll::{ScrollEngine, ScrollPhase, Settle, QUICK_FLING_WINDOW_MS, SETTLE_DEBOUNCE_MS};
pub use time_axis::{calc_sample_step, TimeAxis};
pub use viewport::{BarRect, Viewport, Window, TRAILING_SAMPLE_RESERVE};
