//! Selector controller: the public contract
//!
//! Composes the time axis, sample store, viewport, scroll engine, gesture
//! classifier, and highlight player into one state machine the host talks
//! to. The host feeds in pointer events, frame ticks, and timer ticks; the
//! controller feeds back listener callbacks, re-render requests, and the
//! per-frame render data.
//!
//! Everything is single-threaded and cooperative. Hosts whose timer
//! framework fires on another thread must marshal the tick back before
//! calling in.

use serde::{Deserialize, Serialize};

use crate::gesture::{GestureClassifier, PointerEvent};
use crate::highlight::{HighlightPlayer, HIGHLIGHT_TICK_MS};
use crate::sample::SampleStore;
use crate::scheduler::{Scheduler, TimerToken};
use crate::scroll::{ScrollEngine, SETTLE_DEBOUNCE_MS};
use crate::time_axis::TimeAxis;
use crate::viewport::{BarRect, Viewport};

/// Construction-time configuration. Retained across `dispose`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Track time represented by one full strip width.
    pub full_width_duration_ms: u64,
    /// Bars per half strip; a full strip shows twice this many.
    pub half_bar_count: u32,
    /// Window the release velocity is normalized to.
    pub scrolling_velocity_unit_ms: u32,
    /// Vertical inset above the bars.
    pub padding_top: f32,
    /// Vertical inset below the bars.
    pub padding_bottom: f32,
    /// When false, every fling tick reports `on_changing` instead of only
    /// direction-consistent offsets.
    pub smooth_scroll: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            full_width_duration_ms: 40_000,
            half_bar_count: 36,
            scrolling_velocity_unit_ms: 100,
            padding_top: 20.0,
            padding_bottom: 30.0,
            smooth_scroll: true,
        }
    }
}

/// Host callbacks. All methods default to no-ops so hosts implement only
/// what they consume; an absent listener is equally valid.
pub trait SelectorListener {
    /// The selection time is moving (drag or fling in progress).
    fn on_changing(&mut self, _time_ms: u64) {}
    /// Scrolling settled; `time_ms` is authoritative.
    fn on_select(&mut self, _time_ms: u64) {}
    /// Data and layout are both in place (deferred, never synchronous).
    fn on_ready(&mut self) {}
    /// The drag ran past the scrollable end.
    fn on_limit(&mut self) {}
}

/// One bar ready for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarView {
    pub rect: BarRect,
    /// Position of this bar inside the played gradient (0 at the highlight
    /// start, 1 at its end); `None` for unplayed bars.
    pub played: Option<f32>,
}

/// Render data for one frame, handed to the external renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub width: f32,
    pub height: f32,
    pub bars: Vec<BarView>,
    pub select_line_x: f32,
    /// The offset sits at the scrollable end (tint the selection line).
    pub at_limit: bool,
}

/// The reusable waveform selector, minus any actual drawing.
pub struct SelectorController {
    config: SelectorConfig,
    store: SampleStore,
    axis: Option<TimeAxis>,
    viewport: Option<Viewport>,
    scroll: ScrollEngine,
    gesture: GestureClassifier,
    highlight: HighlightPlayer,
    listener: Option<Box<dyn SelectorListener>>,

    play_duration_ms: u64,
    limited_select_ms: u64,

    pending_seek_ms: Option<u64>,
    ready_token: Option<TimerToken>,
    ready_notified: bool,

    last_select_offset: Option<f32>,
    last_select_ms: u64,
    /// One `on_limit` per drag; re-armed at the next settle.
    limit_armed: bool,
    /// Baseline for direction-consistent fling reporting.
    last_changing_offset: f32,
    last_now_ms: u64,
    needs_redraw: bool,
}

impl SelectorController {
    pub fn new(config: SelectorConfig) -> Self {
        let gesture = GestureClassifier::new(config.scrolling_velocity_unit_ms);
        Self {
            config,
            store: SampleStore::new(),
            axis: None,
            viewport: None,
            scroll: ScrollEngine::new(),
            gesture,
            highlight: HighlightPlayer::new(),
            listener: None,
            play_duration_ms: 0,
            limited_select_ms: 0,
            pending_seek_ms: None,
            ready_token: None,
            ready_notified: false,
            last_select_offset: None,
            last_select_ms: 0,
            limit_armed: true,
            last_changing_offset: 0.0,
            last_now_ms: 0,
            needs_redraw: false,
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn SelectorListener>) {
        self.listener = Some(listener);
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Report the strip size. Rebuilds the time axis and viewport; a live
    /// axis is replaced last-write-wins (hosts recreate widgets freely).
    pub fn layout(&mut self, width: f32, height: f32, scheduler: &mut dyn Scheduler) {
        if self.axis.is_some() {
            log::warn!("time axis already initialized; replacing");
        }
        self.axis = Some(TimeAxis::new(width, self.config.full_width_duration_ms));
        self.viewport = Some(Viewport::new(
            width,
            height,
            self.config.half_bar_count,
            self.config.padding_top,
            self.config.padding_bottom,
        ));
        self.refresh_bounds();
        self.maybe_schedule_ready(scheduler);
        self.needs_redraw = true;
    }

    /// Supply the amplitude data. Accepted once; repeat calls are logged
    /// and ignored until `dispose`.
    pub fn set_data(&mut self, volumes: &[u32], scheduler: &mut dyn Scheduler) {
        if let Err(err) = self.store.set(volumes) {
            log::warn!("set_data ignored: {}", err);
            return;
        }
        self.refresh_bounds();
        self.maybe_schedule_ready(scheduler);
        self.needs_redraw = true;
    }

    /// Replace the sample contents without touching the lifecycle flag or
    /// firing callbacks.
    pub fn refresh_data(&mut self, volumes: &[u32]) {
        if let Err(err) = self.store.refresh(volumes) {
            log::warn!("refresh_data ignored: {}", err);
            return;
        }
        self.refresh_bounds();
        self.needs_redraw = true;
    }

    /// Scroll so `time_ms` sits under the selection line. Deferred until
    /// the ready sequence when layout has not completed yet.
    pub fn seek_to(&mut self, time_ms: u64) {
        let Some(axis) = self.axis else {
            log::debug!("seek_to({}) before layout, deferred", time_ms);
            self.pending_seek_ms = Some(time_ms);
            return;
        };
        let target = axis.to_pixels(time_ms);
        let forced = (target - self.scroll.offset()).abs() < f32::EPSILON;
        self.scroll.seek(target);
        self.last_changing_offset = self.scroll.offset();
        self.emit_select(self.last_now_ms, forced);
        self.needs_redraw = true;
    }

    /// Store the playback duration; a running highlight's end position is
    /// recomputed in place without restarting its timer.
    pub fn set_play_duration(&mut self, duration_ms: u64) {
        self.play_duration_ms = duration_ms;
        if self.highlight.is_running() {
            if let Some(axis) = self.axis {
                self.highlight
                    .set_end(self.highlight.start_pos() + axis.to_pixels(duration_ms));
            }
        }
    }

    /// The configured playback duration.
    pub fn play_duration(&self) -> u64 {
        self.play_duration_ms
    }

    /// Reserve the minimum trailing duration when computing the scroll
    /// range, so the final selectable time stays playable.
    pub fn set_limited_select_time(&mut self, duration_ms: u64) {
        self.limited_select_ms = duration_ms;
        self.refresh_bounds();
    }

    /// Toggle direction-consistency gating of fling reports.
    pub fn set_smooth_scroll(&mut self, enabled: bool) {
        self.config.smooth_scroll = enabled;
    }

    /// Start the highlight at the selection line for the configured play
    /// duration.
    pub fn start_highlight(&mut self, scheduler: &mut dyn Scheduler) {
        if self.play_duration_ms == 0 {
            return;
        }
        let (Some(axis), Some(viewport)) = (self.axis, self.viewport) else {
            return;
        };
        if !self.store.is_initialized() {
            return;
        }
        let start = viewport.padding_px();
        let end = start + axis.to_pixels(self.play_duration_ms);
        self.highlight.start(start, end, scheduler);
        self.needs_redraw = true;
    }

    /// Start the highlight over an explicit pixel range.
    pub fn start_highlight_range(
        &mut self,
        start_px: f32,
        end_px: f32,
        scheduler: &mut dyn Scheduler,
    ) {
        if !self.store.is_initialized() || self.axis.is_none() {
            return;
        }
        self.highlight.start(start_px, end_px, scheduler);
        self.needs_redraw = true;
    }

    pub fn stop_highlight(&mut self, scheduler: &mut dyn Scheduler) {
        self.highlight.stop(scheduler);
        self.needs_redraw = true;
    }

    /// Restart a paused highlight with the current play duration.
    pub fn resume_highlight(&mut self, scheduler: &mut dyn Scheduler) {
        let Some(axis) = self.axis else {
            return;
        };
        if !self.store.is_initialized() || self.play_duration_ms == 0 {
            return;
        }
        let end = self.highlight.start_pos() + axis.to_pixels(self.play_duration_ms);
        self.highlight.resume(end, scheduler);
        self.needs_redraw = true;
    }

    /// Move the highlight progress to `time_ms` past its start.
    pub fn seek_highlight_to_time(&mut self, time_ms: u64) {
        let Some(axis) = self.axis else {
            return;
        };
        self.highlight
            .seek(self.highlight.start_pos() + axis.to_pixels(time_ms));
        self.needs_redraw = true;
    }

    pub fn is_highlight_running(&self) -> bool {
        self.highlight.is_running()
    }

    /// Consume one pointer event. No-op before data and layout are ready.
    pub fn handle_pointer(&mut self, event: PointerEvent, scheduler: &mut dyn Scheduler) {
        let (Some(axis), Some(viewport)) = (self.axis, self.viewport) else {
            return;
        };
        if !self.store.is_initialized() {
            return;
        }
        self.last_now_ms = event.timestamp_ms;
        let fling_max = viewport.max_fling_end(self.store.len());
        let outcome = self.gesture.handle(event, &mut self.scroll, fling_max);

        if outcome.clear_highlight {
            self.highlight.clear(scheduler);
        }
        if outcome.changing {
            let time = axis.to_time(self.scroll.offset());
            self.last_changing_offset = self.scroll.offset();
            self.notify(|l| l.on_changing(time));
        }
        if outcome.limit_crossed && self.limit_armed {
            self.limit_armed = false;
            self.notify(|l| l.on_limit());
        }
        if outcome.select_now {
            self.emit_select(event.timestamp_ms, true);
        }
        self.needs_redraw |= outcome.redraw;
    }

    /// Advance fling physics and settle detection to `now_ms`. Hosts call
    /// this from their frame tick.
    pub fn on_frame(&mut self, now_ms: u64) {
        self.last_now_ms = now_ms;
        let Some(axis) = self.axis else {
            return;
        };
        if self.scroll.animate(now_ms) {
            self.needs_redraw = true;
            let offset = self.scroll.offset();
            let velocity = self.scroll.fling_velocity();
            // Sub-pixel oscillation near the end of a fling would otherwise
            // report times that jump backwards.
            let consistent = if velocity >= 0.0 {
                offset >= self.last_changing_offset
            } else {
                offset <= self.last_changing_offset
            };
            if consistent || !self.config.smooth_scroll {
                self.last_changing_offset = offset;
                let time = axis.to_time(offset);
                self.notify(|l| l.on_changing(time));
            }
        }
        if let Some(settle) = self.scroll.take_settled(now_ms) {
            self.limit_armed = true;
            self.last_changing_offset = settle.offset;
            self.emit_select(now_ms, settle.quick);
            self.needs_redraw = true;
        }
    }

    /// Deliver a timer tick. Ticks for released tokens are dropped.
    pub fn handle_timer(&mut self, token: TimerToken, now_ms: u64, scheduler: &mut dyn Scheduler) {
        self.last_now_ms = now_ms;
        if self.ready_token == Some(token) {
            self.ready_token = None;
            self.ready_notified = true;
            if let Some(seek_ms) = self.pending_seek_ms.take() {
                self.seek_to(seek_ms);
            }
            self.notify(|l| l.on_ready());
            return;
        }
        if self.highlight.owns_timer(token) {
            let step = self
                .axis
                .map(|axis| axis.to_pixels(HIGHLIGHT_TICK_MS))
                .unwrap_or(0.0);
            if self.highlight.tick(step, scheduler) {
                self.needs_redraw = true;
            }
            return;
        }
        log::debug!("ignoring tick for released timer {:?}", token);
    }

    /// Stop timers, drop the data, and release the axis. Configuration and
    /// durations survive; the controller is ready for a fresh lifecycle.
    pub fn dispose(&mut self, scheduler: &mut dyn Scheduler) {
        log::info!("dispose");
        self.highlight.clear(scheduler);
        if let Some(token) = self.ready_token.take() {
            scheduler.cancel(token);
        }
        self.store.clear();
        self.scroll.reset();
        self.gesture.reset();
        self.axis = None;
        self.ready_notified = false;
        self.pending_seek_ms = None;
        self.last_select_offset = None;
        self.last_select_ms = 0;
        self.limit_armed = true;
        self.last_changing_offset = 0.0;
        self.needs_redraw = true;
    }

    /// Whether a re-render was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Selection time currently under the line.
    pub fn current_time_ms(&self) -> u64 {
        match self.axis {
            Some(axis) => axis.to_time(self.scroll.render_offset()),
            None => 0,
        }
    }

    /// Build the render data for the current state. `None` until data and
    /// layout are both present.
    pub fn frame(&self) -> Option<RenderFrame> {
        let viewport = self.viewport?;
        if !self.store.is_initialized() {
            return None;
        }
        let offset = self.scroll.render_offset();
        let window = viewport.visible_window(offset, self.store.len());
        let hl_start = self.highlight.start_pos();
        let hl_end = self.highlight.end_pos();
        let hl_progress = self.highlight.progress_pos();
        let bar_width = viewport.bar_width();
        let bars = viewport
            .bars(offset, self.store.samples(), window)
            .map(|rect| {
                let played = if rect.x >= hl_start - bar_width
                    && rect.x + rect.width <= hl_progress + bar_width
                {
                    let span = hl_end - hl_start;
                    let fraction = if span > 0.0 {
                        ((rect.x - hl_start) / span).clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                    Some(fraction)
                } else {
                    None
                };
                BarView { rect, played }
            })
            .collect();
        let max = self.scroll.max_offset();
        Some(RenderFrame {
            width: viewport.full_width(),
            height: viewport.full_height(),
            bars,
            select_line_x: viewport.full_width() / 2.0,
            at_limit: max > 0.0 && offset >= max,
        })
    }

    fn refresh_bounds(&mut self) {
        if let (Some(axis), Some(viewport)) = (self.axis, self.viewport.as_mut()) {
            viewport.set_reserve_px(axis.to_pixels(self.limited_select_ms));
            self.scroll
                .set_max_offset(viewport.max_offset(self.store.len()));
        }
    }

    fn maybe_schedule_ready(&mut self, scheduler: &mut dyn Scheduler) {
        if self.store.is_initialized()
            && self.axis.is_some()
            && !self.ready_notified
            && self.ready_token.is_none()
        {
            self.ready_token = Some(scheduler.schedule_deferred());
        }
    }

    /// Fire `on_select` under the debounce rules: a changed offset, a lapse
    /// of the debounce window, the leftmost boundary, or a forced report.
    fn emit_select(&mut self, now_ms: u64, forced: bool) {
        let Some(axis) = self.axis else {
            return;
        };
        let offset = self.scroll.offset();
        let changed = self.last_select_offset != Some(offset);
        let elapsed = now_ms.saturating_sub(self.last_select_ms);
        if forced || offset == 0.0 || changed || elapsed > SETTLE_DEBOUNCE_MS {
            self.last_select_offset = Some(offset);
            self.last_select_ms = now_ms;
            let time = axis.to_time(offset);
            self.notify(|l| l.on_select(time));
        }
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn SelectorListener)) {
        if let Some(listener) = self.listener.as_mut() {
            f(listener.as_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TimerWheel;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Changing(u64),
        Select(u64),
        Ready,
        Limit,
    }

    #[derive(Default, Clone)]
    struct Recorder {
        events: Rc<RefCell<Vec<Event>>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<Event> {
            self.events.borrow_mut().drain(..).collect()
        }

        fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
            self.events.borrow().iter().filter(|e| pred(e)).count()
        }
    }

    impl SelectorListener for Recorder {
        fn on_changing(&mut self, time_ms: u64) {
            self.events.borrow_mut().push(Event::Changing(time_ms));
        }

        fn on_select(&mut self, time_ms: u64) {
            self.events.borrow_mut().push(Event::Select(time_ms));
        }

        fn on_ready(&mut self) {
            self.events.borrow_mut().push(Event::Ready);
        }

        fn on_limit(&mut self) {
            self.events.borrow_mut().push(Event::Limit);
        }
    }

    fn volumes() -> Vec<u32> {
        (0..200u32).map(|i| (i * 327) % 65_536).collect()
    }

    /// 720x200 strip, 40s span, 200 samples: the reference scenario.
    fn ready_controller() -> (SelectorController, Recorder, TimerWheel) {
        let mut wheel = TimerWheel::new();
        let recorder = Recorder::default();
        let mut c = SelectorController::new(SelectorConfig::default());
        c.set_listener(Box::new(recorder.clone()));
        c.layout(720.0, 200.0, &mut wheel);
        c.set_data(&volumes(), &mut wheel);
        for token in wheel.poll(0) {
            c.handle_timer(token, 0, &mut wheel);
        }
        recorder.take();
        (c, recorder, wheel)
    }

    fn settle(c: &mut SelectorController, wheel: &mut TimerWheel, x: f32, now: u64) {
        c.handle_pointer(PointerEvent::down(x, now), wheel);
        c.handle_pointer(PointerEvent::up(x, now + 10), wheel);
        c.on_frame(now + 20);
    }

    #[test]
    fn test_ready_is_deferred_and_replays_seek() {
        let mut wheel = TimerWheel::new();
        let recorder = Recorder::default();
        let mut c = SelectorController::new(SelectorConfig::default());
        c.set_listener(Box::new(recorder.clone()));

        c.seek_to(2000);
        c.set_data(&volumes(), &mut wheel);
        // No layout yet: nothing fires, even after a poll
        assert!(wheel.poll(10).is_empty());
        assert!(recorder.take().is_empty());

        c.layout(720.0, 200.0, &mut wheel);
        // Still deferred: the callback only fires on the next tick
        assert!(recorder.take().is_empty());
        for token in wheel.poll(10) {
            c.handle_timer(token, 10, &mut wheel);
        }
        let events = recorder.take();
        // The stored seek replays (2000ms -> 36px) before on_ready
        assert_eq!(events, vec![Event::Select(2000), Event::Ready]);
        assert!((c.scroll.offset() - 36.0).abs() < 1e-3);
        assert_eq!(c.current_time_ms(), 2000);
    }

    #[test]
    fn test_second_set_data_is_ignored() {
        let (mut c, _r, mut wheel) = ready_controller();
        let frame = c.frame().unwrap();
        c.set_data(&[1, 2, 3], &mut wheel);
        assert_eq!(c.frame().unwrap().bars.len(), frame.bars.len());

        // refresh_data swaps contents without callbacks
        c.refresh_data(&vec![500u32; 120]);
        assert!(c.frame().is_some());
    }

    #[test]
    fn test_seek_to_same_target_forces_select() {
        let (mut c, recorder, _wheel) = ready_controller();
        c.seek_to(2000);
        assert_eq!(recorder.take(), vec![Event::Select(2000)]);
        // Same target again: change detection would swallow it, so the
        // seek forces the report
        c.seek_to(2000);
        assert_eq!(recorder.take(), vec![Event::Select(2000)]);
    }

    #[test]
    fn test_settle_debounce() {
        let (mut c, recorder, mut wheel) = ready_controller();
        c.seek_to(2000);
        recorder.take();

        // Two zero-movement settles at the same offset within 200ms: one
        // report
        settle(&mut c, &mut wheel, 500.0, 1000);
        settle(&mut c, &mut wheel, 500.0, 1100);
        assert_eq!(recorder.count(|e| matches!(e, Event::Select(_))), 1);
        recorder.take();

        // The same pair spaced past the debounce window: two reports
        settle(&mut c, &mut wheel, 500.0, 2000);
        settle(&mut c, &mut wheel, 500.0, 2400);
        assert_eq!(recorder.count(|e| matches!(e, Event::Select(_))), 2);
    }

    #[test]
    fn test_origin_always_reports() {
        let (mut c, recorder, mut wheel) = ready_controller();
        // Repeated settles at offset 0 within the debounce window all fire
        settle(&mut c, &mut wheel, 500.0, 1000);
        settle(&mut c, &mut wheel, 500.0, 1050);
        assert_eq!(recorder.count(|e| *e == Event::Select(0)), 2);
    }

    #[test]
    fn test_drag_reports_changing_and_clears_highlight() {
        let (mut c, recorder, mut wheel) = ready_controller();
        c.set_play_duration(5000);
        c.start_highlight(&mut wheel);
        assert!(c.is_highlight_running());

        c.handle_pointer(PointerEvent::down(500.0, 100), &mut wheel);
        c.handle_pointer(PointerEvent::moved(450.0, 120), &mut wheel);
        assert!(!c.is_highlight_running());
        assert_eq!(recorder.count(|e| matches!(e, Event::Changing(_))), 1);
    }

    #[test]
    fn test_limit_fires_once_per_drag() {
        let (mut c, recorder, mut wheel) = ready_controller();
        // Reserve most of the range so a drag can cross the end:
        // max = 1990 - 1800 = 190
        c.set_limited_select_time(100_000);

        c.handle_pointer(PointerEvent::down(700.0, 100), &mut wheel);
        c.handle_pointer(PointerEvent::moved(300.0, 120), &mut wheel);
        c.handle_pointer(PointerEvent::moved(100.0, 140), &mut wheel);
        // Two crossings in one drag report once
        assert_eq!(recorder.count(|e| *e == Event::Limit), 1);
        // Release late enough that the velocity window is empty (no fling)
        c.handle_pointer(PointerEvent::up(100.0, 400), &mut wheel);
        c.on_frame(500);

        // Re-armed after the settle: the next crossing fires again
        c.handle_pointer(PointerEvent::down(700.0, 1000), &mut wheel);
        c.handle_pointer(PointerEvent::moved(200.0, 1020), &mut wheel);
        assert_eq!(recorder.count(|e| *e == Event::Limit), 2);
    }

    #[test]
    fn test_highlight_scenario_and_duration_recompute() {
        let (mut c, _r, mut wheel) = ready_controller();
        c.set_play_duration(5000);
        c.start_highlight(&mut wheel);
        // start 360, end 360 + 5000 * 0.018 = 450
        assert!((c.highlight.start_pos() - 360.0).abs() < 1e-3);
        assert!((c.highlight.end_pos() - 450.0).abs() < 1e-3);
        let frame = c.frame().unwrap();
        assert!(frame.bars.iter().any(|b| b.played.is_some()));

        // Growing the duration while running moves the end in place
        c.set_play_duration(10_000);
        assert!(c.is_highlight_running());
        assert!((c.highlight.end_pos() - 540.0).abs() < 1e-3);

        // Ticks advance progress and request redraws
        c.take_redraw();
        for token in wheel.poll(HIGHLIGHT_TICK_MS) {
            c.handle_timer(token, HIGHLIGHT_TICK_MS, &mut wheel);
        }
        assert!(c.take_redraw());
    }

    #[test]
    fn test_stale_timer_tick_is_dropped() {
        let (mut c, _r, mut wheel) = ready_controller();
        c.set_play_duration(5000);
        c.start_highlight(&mut wheel);
        let token = wheel.poll(HIGHLIGHT_TICK_MS)[0];
        c.stop_highlight(&mut wheel);
        // The tick arrives after the timer was released: nothing mutates
        c.handle_timer(token, HIGHLIGHT_TICK_MS, &mut wheel);
        assert!(!c.is_highlight_running());
    }

    #[test]
    fn test_fling_changing_is_direction_consistent() {
        let (mut c, recorder, mut wheel) = ready_controller();
        c.handle_pointer(PointerEvent::down(600.0, 0), &mut wheel);
        c.handle_pointer(PointerEvent::moved(500.0, 20), &mut wheel);
        c.handle_pointer(PointerEvent::moved(400.0, 40), &mut wheel);
        c.handle_pointer(PointerEvent::up(350.0, 60), &mut wheel);
        recorder.take();

        let mut now = 60;
        let mut last_time = 0;
        loop {
            now += 16;
            c.on_frame(now);
            let events = recorder.take();
            let done = events.iter().any(|e| matches!(e, Event::Select(_)));
            for event in events {
                if let Event::Changing(t) = event {
                    // Leftward fling: reported times never move backwards
                    assert!(t >= last_time, "{} < {}", t, last_time);
                    last_time = t;
                }
            }
            if done {
                break;
            }
            assert!(now < 10_000, "fling never settled");
        }
    }

    #[test]
    fn test_dispose_resets_lifecycle_but_keeps_config() {
        let (mut c, recorder, mut wheel) = ready_controller();
        c.set_play_duration(5000);
        c.start_highlight(&mut wheel);
        c.dispose(&mut wheel);

        assert!(!c.is_highlight_running());
        assert!(c.frame().is_none());
        assert_eq!(c.play_duration(), 5000);
        // Highlight timer was released: no stray ticks
        assert!(wheel.poll(10_000).is_empty());

        // A fresh lifecycle works: layout + data fire ready again
        c.layout(720.0, 200.0, &mut wheel);
        c.set_data(&volumes(), &mut wheel);
        for token in wheel.poll(20_000) {
            c.handle_timer(token, 20_000, &mut wheel);
        }
        assert_eq!(recorder.count(|e| *e == Event::Ready), 1);
        assert!(c.frame().is_some());
    }

    #[test]
    fn test_highlight_controls_noop_before_init() {
        let mut wheel = TimerWheel::new();
        let mut c = SelectorController::new(SelectorConfig::default());
        c.set_play_duration(5000);
        c.start_highlight(&mut wheel);
        c.resume_highlight(&mut wheel);
        c.seek_highlight_to_time(1000);
        assert!(!c.is_highlight_running());
        assert!(c.frame().is_none());
    }
}
