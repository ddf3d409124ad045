//! View function for the selector strip
//!
//! Plain function taking render data plus a callback closure and returning
//! an `Element`, following the idiomatic iced 0.14 pattern used across
//! this workspace's widgets.

use iced::widget::Canvas;
use iced::{Element, Length};

use wavestrip_core::{PointerKind, RenderFrame};

use super::canvas::StripCanvas;
use crate::theme::StripStyle;

/// Default strip height in pixels.
pub const STRIP_HEIGHT: f32 = 120.0;

/// Create a selector strip element.
///
/// # Arguments
///
/// * `frame` - Render data from `SelectorController::frame()`; `None`
///   before data and layout are ready (draws background only)
/// * `style` - Strip colors
/// * `on_event` - Called with the pointer phase and strip-local x; the host
///   stamps a timestamp and forwards to the controller
///
/// # Example
///
/// ```ignore
/// let strip = wave_strip(
///     self.selector.frame(),
///     StripStyle::default(),
///     |kind, x| Message::Pointer(kind, x),
/// );
/// ```
pub fn wave_strip<'a, Message>(
    frame: Option<RenderFrame>,
    style: StripStyle,
    on_event: impl Fn(PointerKind, f32) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    Canvas::new(StripCanvas {
        frame,
        style,
        on_event,
    })
    .width(Length::Fill)
    .height(Length::Fixed(STRIP_HEIGHT))
    .into()
}
