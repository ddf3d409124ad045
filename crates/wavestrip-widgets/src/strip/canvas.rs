//! Canvas Program implementation for the selector strip
//!
//! Implements the iced canvas `Program` trait: `update` translates mouse
//! input into core pointer events published through a callback closure, and
//! `draw` renders a [`RenderFrame`] produced by the controller. The canvas
//! itself holds no selector state beyond drag tracking; the host owns the
//! controller and stamps event timestamps on receipt.

use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke};
use iced::{mouse, Point, Rectangle, Size, Theme};

use wavestrip_core::{PointerKind, RenderFrame};

use crate::theme::{lerp_color, StripStyle};

/// Canvas state tracking one press-drag-release cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripInteraction {
    /// Whether the left button is down inside the strip.
    pub is_dragging: bool,
}

/// Canvas program for the selector strip.
///
/// `on_event` is called with the pointer phase and the x coordinate in
/// strip-local pixels; the host wraps both into a timestamped
/// `PointerEvent` for the controller.
pub struct StripCanvas<Message, F>
where
    F: Fn(PointerKind, f32) -> Message,
{
    pub frame: Option<RenderFrame>,
    pub style: StripStyle,
    pub on_event: F,
}

impl<Message, F> Program<Message> for StripCanvas<Message, F>
where
    Message: Clone,
    F: Fn(PointerKind, f32) -> Message,
{
    type State = StripInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        if let Some(position) = cursor.position_in(bounds) {
            match event {
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                    interaction.is_dragging = true;
                    return Some(canvas::Action::publish((self.on_event)(
                        PointerKind::Down,
                        position.x,
                    )));
                }
                Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                    if interaction.is_dragging {
                        return Some(canvas::Action::publish((self.on_event)(
                            PointerKind::Move,
                            position.x,
                        )));
                    }
                }
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                    if interaction.is_dragging {
                        interaction.is_dragging = false;
                        return Some(canvas::Action::publish((self.on_event)(
                            PointerKind::Up,
                            position.x,
                        )));
                    }
                }
                _ => {}
            }
        } else if matches!(event, Event::Mouse(mouse::Event::ButtonReleased(_)))
            && interaction.is_dragging
        {
            // Released outside the strip: the gesture is cancelled rather
            // than flung.
            interaction.is_dragging = false;
            return Some(canvas::Action::publish((self.on_event)(
                PointerKind::Cancel,
                0.0,
            )));
        }

        None
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            if interaction.is_dragging {
                mouse::Interaction::Grabbing
            } else {
                mouse::Interaction::Grab
            }
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), self.style.background);

        let Some(render) = &self.frame else {
            return vec![frame.into_geometry()];
        };

        for bar in &render.bars {
            let color = match bar.played {
                Some(fraction) => {
                    lerp_color(self.style.played_start, self.style.played_end, fraction)
                }
                None => self.style.wave,
            };
            frame.fill_rectangle(
                Point::new(bar.rect.x, bar.rect.y),
                Size::new(bar.rect.width, bar.rect.height),
                color,
            );
        }

        // Selection line over the bars, tinted while pinned at the limit
        let line_color = if render.at_limit {
            self.style.select_line_on_limit
        } else {
            self.style.select_line
        };
        frame.stroke(
            &Path::line(
                Point::new(render.select_line_x, 0.0),
                Point::new(render.select_line_x, bounds.height),
            ),
            Stroke::default()
                .with_color(line_color)
                .with_width(self.style.select_line_width),
        );

        vec![frame.into_geometry()]
    }
}
