//! Selector strip widget
//!
//! iced adapter around `wavestrip-core`: a canvas `Program` that publishes
//! pointer events and draws controller render frames, plus the view
//! function hosts embed.

mod canvas;
mod view;

pub use canvas::{StripCanvas, StripInteraction};
pub use view::{wave_strip, STRIP_HEIGHT};
