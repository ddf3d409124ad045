//! Visible-window computation and bar placement
//!
//! Maps a scroll offset to the subset of samples eligible for rendering and
//! to per-bar screen rectangles. All geometry derives from the strip size:
//! a full strip shows `2 × half_bar_count` bars, each bar unit being one
//! bar plus an equal gap, and half a strip of padding leads/trails the data
//! so the first and last sample can sit under the centered selection line.

use crate::sample::Sample;

/// The window slice stops this many samples short of the end of the store.
///
/// Inherited behavior: the final sample is never part of a full page.
/// Kept under a name so the exclusion is visible at the call site.
pub const TRAILING_SAMPLE_RESERVE: usize = 1;

/// Contiguous run of samples eligible for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Index of the first sample in the window.
    pub start_index: usize,
    /// Number of samples in the window.
    pub count: usize,
}

/// Screen rectangle for one waveform bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Derived strip geometry plus the window/offset arithmetic on top of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    full_width: f32,
    full_height: f32,
    padding_top: f32,
    padding_bottom: f32,
    /// Bars visible on a full strip (2 × half_bar_count).
    visible_bar_count: u32,
    /// Drawn width of one bar; the trailing gap is the same width.
    bar_width: f32,
    /// Half-strip lead/trail padding.
    padding_px: f32,
    /// Scroll range reserved at the tail for the minimum playable duration.
    reserve_px: f32,
}

impl Viewport {
    pub fn new(
        full_width: f32,
        full_height: f32,
        half_bar_count: u32,
        padding_top: f32,
        padding_bottom: f32,
    ) -> Self {
        let visible_bar_count = half_bar_count * 2;
        Self {
            full_width,
            full_height,
            padding_top,
            padding_bottom,
            visible_bar_count,
            bar_width: full_width / visible_bar_count as f32 / 2.0,
            padding_px: full_width / 2.0,
            reserve_px: 0.0,
        }
    }

    /// One bar plus its gap.
    pub fn bar_unit(&self) -> f32 {
        self.bar_width * 2.0
    }

    pub fn bar_width(&self) -> f32 {
        self.bar_width
    }

    pub fn padding_px(&self) -> f32 {
        self.padding_px
    }

    pub fn full_width(&self) -> f32 {
        self.full_width
    }

    pub fn full_height(&self) -> f32 {
        self.full_height
    }

    /// Reserve tail scroll range (pixel equivalent of the minimum
    /// selectable duration). Shrinks `max_offset`.
    pub fn set_reserve_px(&mut self, reserve_px: f32) {
        self.reserve_px = reserve_px.max(0.0);
    }

    /// Start index of the last page, in samples.
    fn last_page_start(&self, sample_count: usize) -> usize {
        let capacity = self.page_capacity(sample_count);
        let pad_bars = (self.padding_px / self.bar_unit()) as usize;
        sample_count - capacity + pad_bars
    }

    /// Samples one page can hold: one full strip plus the partial bar
    /// entering at the edge.
    pub fn page_capacity(&self, sample_count: usize) -> usize {
        sample_count.min(self.visible_bar_count as usize + 1)
    }

    /// The subset of samples to render for `offset`.
    pub fn visible_window(&self, offset: f32, sample_count: usize) -> Window {
        if sample_count == 0 {
            return Window { start_index: 0, count: 0 };
        }
        let raw_index = ((offset - self.padding_px) / self.bar_unit()).floor() as i64;
        let last_page_start = self.last_page_start(sample_count) as i64;
        let start = raw_index.clamp(0, last_page_start) as usize;
        let end = (start + self.page_capacity(sample_count))
            .min(sample_count.saturating_sub(TRAILING_SAMPLE_RESERVE));
        Window {
            start_index: start,
            count: end.saturating_sub(start),
        }
    }

    /// Largest valid scroll offset for `sample_count` samples.
    pub fn max_offset(&self, sample_count: usize) -> f32 {
        if sample_count == 0 {
            return 0.0;
        }
        let base = self.bar_unit() * self.last_page_start(sample_count) as f32 + self.padding_px;
        (base - self.reserve_px).max(0.0)
    }

    /// Upper fling bound: the content width plus both pads. Flings may
    /// overshoot `max_offset` and are clamped on the way back down.
    pub fn max_fling_end(&self, sample_count: usize) -> f32 {
        sample_count as f32 * self.bar_unit() + 2.0 * self.padding_px
    }

    /// Screen rectangles for the bars of `window`, left to right.
    ///
    /// Short-circuits at the right strip edge; callers should not assume
    /// every window sample yields a rect.
    pub fn bars<'a>(
        &self,
        offset: f32,
        samples: &'a [Sample],
        window: Window,
    ) -> impl Iterator<Item = BarRect> + 'a {
        let vp = *self;
        let unit = vp.bar_unit();
        // Within the first page the unused lead pad shifts bars right;
        // past it the sub-unit remainder shifts them left.
        let lead = if offset <= vp.padding_px {
            vp.padding_px - offset
        } else {
            -(offset % unit)
        };
        let end = (window.start_index + window.count).min(samples.len());
        samples[window.start_index.min(end)..end]
            .iter()
            .enumerate()
            .map_while(move |(i, sample)| {
                let left = i as f32 * unit + lead;
                if left > vp.full_width {
                    return None;
                }
                let right = left + vp.bar_width;
                let usable = vp.full_height - vp.padding_top - vp.padding_bottom;
                let height = sample.display_percent() * usable;
                let x = left.max(0.0);
                Some(BarRect {
                    x,
                    y: vp.full_height / 2.0 - height / 2.0,
                    width: right - x,
                    height,
                })
            })
            .filter(|bar| bar.width > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SampleStore;

    // 720px strip, 36 bars per half screen: 5px bars, 10px units, 360px pad
    fn vp() -> Viewport {
        Viewport::new(720.0, 200.0, 36, 20.0, 30.0)
    }

    #[test]
    fn test_geometry() {
        let vp = vp();
        assert!((vp.bar_width() - 5.0).abs() < 1e-4);
        assert!((vp.bar_unit() - 10.0).abs() < 1e-4);
        assert!((vp.padding_px() - 360.0).abs() < 1e-4);
    }

    #[test]
    fn test_window_bounds_hold_for_any_offset() {
        let vp = vp();
        for n in [0usize, 1, 5, 73, 200, 1000] {
            for offset in [-50.0f32, 0.0, 10.0, 359.0, 360.0, 1990.0, 1e6] {
                let w = vp.visible_window(offset, n);
                assert!(w.count <= vp.page_capacity(n), "n={} o={}", n, offset);
                if n > 0 {
                    assert!(w.start_index <= vp.last_page_start(n));
                }
                assert!(w.start_index + w.count <= n);
            }
        }
    }

    #[test]
    fn test_window_scenario_200_samples() {
        let vp = vp();
        // capacity 73, last page start 200 - 73 + 36 = 163
        assert_eq!(vp.page_capacity(200), 73);
        assert_eq!(vp.last_page_start(200), 163);
        assert!((vp.max_offset(200) - 1990.0).abs() < 1e-3);

        // Inside the lead pad the window starts at 0
        let w = vp.visible_window(0.0, 200);
        assert_eq!(w.start_index, 0);
        // One past the pad, one unit scrolls one sample
        let w = vp.visible_window(380.0, 200);
        assert_eq!(w.start_index, 2);
        // Clamped to the last page for any huge offset
        let w = vp.visible_window(1e9, 200);
        assert_eq!(w.start_index, 163);
    }

    #[test]
    fn test_trailing_sample_reserved() {
        let vp = vp();
        let w = vp.visible_window(1e9, 200);
        // 163 + 73 would reach 236; the slice stops at len - 1 = 199
        assert_eq!(w.start_index + w.count, 200 - TRAILING_SAMPLE_RESERVE);
    }

    #[test]
    fn test_max_offset_reserve() {
        let mut vp = vp();
        vp.set_reserve_px(90.0);
        assert!((vp.max_offset(200) - 1900.0).abs() < 1e-3);
        // Reserve larger than the range floors at zero
        vp.set_reserve_px(1e9);
        assert_eq!(vp.max_offset(200), 0.0);
        assert_eq!(vp.max_offset(0), 0.0);
    }

    #[test]
    fn test_bar_placement_first_page() {
        let vp = vp();
        let mut store = SampleStore::new();
        store.set(&vec![40_000u32; 200]).unwrap();
        let w = vp.visible_window(0.0, 200);

        let bars: Vec<_> = vp.bars(0.0, store.samples(), w).collect();
        // At offset 0 the first bar sits at the pad boundary
        assert!((bars[0].x - 360.0).abs() < 1e-3);
        assert!((bars[1].x - 370.0).abs() < 1e-3);
        // Everything at or before the strip edge, then short-circuit
        assert!(bars.iter().all(|b| b.x <= 720.0));
        assert_eq!(bars.len(), 37);
    }

    #[test]
    fn test_bar_placement_past_lead_pad() {
        let vp = vp();
        let mut store = SampleStore::new();
        store.set(&vec![40_000u32; 200]).unwrap();

        // offset 363: window start 0, bars shifted left by 363 % 10 = 3
        let w = vp.visible_window(363.0, 200);
        let bars: Vec<_> = vp.bars(363.0, store.samples(), w).collect();
        // First bar starts off-screen: clamped to 0 with reduced width
        assert_eq!(bars[0].x, 0.0);
        assert!((bars[0].width - 2.0).abs() < 1e-3);
        assert!((bars[1].x - 7.0).abs() < 1e-3);
    }

    #[test]
    fn test_bar_heights_respect_padding() {
        let vp = vp();
        let mut store = SampleStore::new();
        store.set(&[65_535]).unwrap();
        let w = vp.visible_window(0.0, 1);
        // Window is empty due to the trailing reserve on a 1-sample store
        assert_eq!(w.count, 0);

        store.refresh(&[65_535, 65_535]).unwrap();
        let w = vp.visible_window(0.0, 2);
        let bars: Vec<_> = vp.bars(0.0, store.samples(), w).collect();
        let usable = 200.0 - 20.0 - 30.0;
        assert!((bars[0].height - usable).abs() < 1.0);
    }
}
