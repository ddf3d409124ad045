//! Shared theme constants for the wavestrip widgets
//!
//! Colors and visual constants for the selector strip. Hosts override the
//! defaults by constructing their own [`StripStyle`].

use iced::Color;

/// Visual styling for the selector strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripStyle {
    /// Canvas background.
    pub background: Color,
    /// Unplayed waveform bars.
    pub wave: Color,
    /// Played-gradient color at the highlight start.
    pub played_start: Color,
    /// Played-gradient color at the highlight end.
    pub played_end: Color,
    /// Centered selection line.
    pub select_line: Color,
    /// Selection line while the offset sits at the scrollable end.
    pub select_line_on_limit: Color,
    /// Selection line stroke width.
    pub select_line_width: f32,
}

impl Default for StripStyle {
    fn default() -> Self {
        Self {
            background: Color::from_rgb(0.08, 0.08, 0.1),
            wave: Color::from_rgb(0.45, 0.45, 0.5),
            played_start: Color::from_rgb(0.0, 1.0, 0.0), // Green
            played_end: Color::from_rgb(0.0, 0.0, 1.0),   // Blue
            select_line: Color::from_rgb(1.0, 1.0, 1.0),
            select_line_on_limit: Color::from_rgb(1.0, 0.3, 0.3),
            select_line_width: 2.0,
        }
    }
}

/// Componentwise linear interpolation between two colors.
///
/// Drives the played gradient: each bar samples the gradient at its
/// position between the highlight start and end.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color {
        r: a.r + (b.r - a.r) * t,
        g: a.g + (b.g - a.g) * t,
        b: a.b + (b.b - a.b) * t,
        a: a.a + (b.a - a.a) * t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let style = StripStyle::default();
        let start = lerp_color(style.played_start, style.played_end, 0.0);
        assert_eq!(start, style.played_start);
        let end = lerp_color(style.played_start, style.played_end, 1.0);
        assert_eq!(end, style.played_end);

        let mid = lerp_color(style.played_start, style.played_end, 0.5);
        assert!((mid.g - 0.5).abs() < 1e-6);
        assert!((mid.b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_clamps_fraction() {
        let a = Color::from_rgb(0.2, 0.2, 0.2);
        let b = Color::from_rgb(0.8, 0.8, 0.8);
        assert_eq!(lerp_color(a, b, -1.0), lerp_color(a, b, 0.0));
        assert_eq!(lerp_color(a, b, 2.0), lerp_color(a, b, 1.0));
    }
}
