//! iced widgets for the wavestrip waveform selector
//!
//! This crate adapts the draw-independent `wavestrip-core` engine to iced:
//!
//! - **Theme constants** ([`StripStyle`], [`lerp_color`]): strip colors and
//!   the played-gradient interpolation
//! - **Canvas Program** ([`StripCanvas`]): event-to-callback translation
//!   and frame rendering
//! - **View function** ([`wave_strip`]): state + callbacks in, `Element`
//!   out
//!
//! The host owns the `SelectorController`; the widget stays stateless
//! beyond per-gesture drag tracking.

pub mod strip;
pub mod theme;

pub use strip::{wave_strip, StripCanvas, StripInteraction, STRIP_HEIGHT};
pub use theme::{lerp_color, StripStyle};
