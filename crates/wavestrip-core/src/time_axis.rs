//! Millisecond ↔ pixel conversion
//!
//! The axis is fixed at layout time from the strip width and the duration a
//! full strip width represents. It is owned by the controller and rebuilt on
//! every layout pass; components that need conversions receive it by
//! reference rather than through any shared global.

/// Fixed-ratio conversion between track time and horizontal pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    pixels_per_ms: f32,
}

impl TimeAxis {
    /// Build an axis for a strip of `full_width_px` spanning
    /// `full_width_duration_ms` of track time.
    pub fn new(full_width_px: f32, full_width_duration_ms: u64) -> Self {
        Self {
            pixels_per_ms: full_width_px / full_width_duration_ms as f32,
        }
    }

    /// Pixels per millisecond of track time.
    pub fn pixels_per_ms(&self) -> f32 {
        self.pixels_per_ms
    }

    /// Convert a duration to its pixel equivalent.
    pub fn to_pixels(&self, time_ms: u64) -> f32 {
        time_ms as f32 * self.pixels_per_ms
    }

    /// Convert a pixel distance back to milliseconds (floored).
    ///
    /// Negative distances map to 0 rather than wrapping.
    pub fn to_time(&self, px: f32) -> u64 {
        if px <= 0.0 || self.pixels_per_ms <= 0.0 {
            return 0;
        }
        (px / self.pixels_per_ms) as u64
    }
}

/// How many PCM analysis points one drawn bar should consume.
///
/// `rate` is the sample rate, `draw_point_count` the number of bars a full
/// strip shows, `draw_duration_s` the seconds a full strip spans. At
/// 44.1 kHz one 1024-frame analysis window is ~23.22 ms, i.e. ~43 points
/// per second; 72 bars over 40 s wants 1.8 bars per second, so one bar
/// aggregates ~24 points.
pub fn calc_sample_step(rate: u32, draw_point_count: u32, draw_duration_s: u32) -> u32 {
    let k = 1000.0_f32 / rate as f32 * 1024.0;
    let m = 1000.0_f32 / k;
    let d = draw_point_count as f32 / draw_duration_s as f32;
    (m / d).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> TimeAxis {
        // 720px strip spanning 40s: 0.018 px/ms
        TimeAxis::new(720.0, 40_000)
    }

    #[test]
    fn test_pixel_conversion() {
        let axis = axis();
        assert!((axis.to_pixels(2000) - 36.0).abs() < 1e-4);
        assert!((axis.to_pixels(5000) - 90.0).abs() < 1e-4);
        assert_eq!(axis.to_time(36.0), 2000);
    }

    #[test]
    fn test_round_trip_within_one_unit() {
        let axis = axis();
        for ms in [0u64, 1, 17, 199, 2000, 39_999] {
            let back = axis.to_time(axis.to_pixels(ms));
            assert!(back.abs_diff(ms) <= 1, "ms={} back={}", ms, back);
        }
        for px in [0.0f32, 0.5, 36.0, 359.5, 720.0] {
            let back = axis.to_pixels(axis.to_time(px));
            assert!((back - px).abs() <= axis.pixels_per_ms() + 1e-3);
        }
    }

    #[test]
    fn test_negative_pixels_floor_to_zero() {
        assert_eq!(axis().to_time(-10.0), 0);
    }

    #[test]
    fn test_calc_sample_step() {
        // k≈23.22ms per point, m≈43.07 points/s, d=1.8 bars/s, s≈23.93
        assert_eq!(calc_sample_step(44_100, 72, 40), 24);
    }
}
