//! Highlight playback state machine
//!
//! Animates the "played so far" overlay between a start and end position in
//! screen pixels. The player owns no timer itself: it asks the injected
//! [`Scheduler`] for a periodic tick and remembers the token; ticks are
//! delivered back by the controller and matched against that token, so a
//! tick that arrives after `stop` released the timer is dropped.

use crate::scheduler::{Scheduler, TimerToken};

/// Wall-clock interval between progress ticks.
pub const HIGHLIGHT_TICK_MS: u64 = 200;

/// Slack allowed when re-seeking the progress marker, to absorb rounding
/// in pixel conversions. Seeks further outside the range are ignored.
pub const RESUME_TOLERANCE_PX: f32 = 50.0;

/// Timer-driven progress between a start and end offset.
#[derive(Debug, Default)]
pub struct HighlightPlayer {
    start_pos: f32,
    end_pos: f32,
    progress_pos: f32,
    running: bool,
    timer: Option<TimerToken>,
}

impl HighlightPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start_pos(&self) -> f32 {
        self.start_pos
    }

    pub fn end_pos(&self) -> f32 {
        self.end_pos
    }

    pub fn progress_pos(&self) -> f32 {
        self.progress_pos
    }

    /// Whether `token` is this player's live timer.
    pub fn owns_timer(&self, token: TimerToken) -> bool {
        self.timer == Some(token)
    }

    /// Begin a playback run over `[start_px, end_px]`.
    ///
    /// A second call while running is a no-op; stop first to change the
    /// range, or adjust the end in place with [`set_end`](Self::set_end).
    pub fn start(&mut self, start_px: f32, end_px: f32, scheduler: &mut dyn Scheduler) {
        if self.running {
            log::debug!("highlight already running, ignoring start");
            return;
        }
        log::debug!("highlight start {}..{}", start_px, end_px);
        self.start_pos = start_px;
        self.end_pos = end_px;
        self.progress_pos = start_px;
        self.timer = Some(scheduler.schedule_periodic(HIGHLIGHT_TICK_MS));
        self.running = true;
    }

    /// Restart the timer without resetting progress (after a host pause).
    pub fn resume(&mut self, end_px: f32, scheduler: &mut dyn Scheduler) {
        self.end_pos = end_px;
        if !self.running {
            self.timer = Some(scheduler.schedule_periodic(HIGHLIGHT_TICK_MS));
            self.running = true;
        }
    }

    /// Move the progress marker, tolerating slight overshoot of the range.
    pub fn seek(&mut self, pos_px: f32) {
        if pos_px < self.start_pos - RESUME_TOLERANCE_PX
            || pos_px > self.end_pos + RESUME_TOLERANCE_PX
        {
            log::debug!(
                "highlight seek {} outside {}..{}, ignored",
                pos_px,
                self.start_pos,
                self.end_pos
            );
            return;
        }
        self.progress_pos = pos_px.clamp(self.start_pos, self.end_pos);
    }

    /// Recompute the end position in place; the timer keeps running.
    pub fn set_end(&mut self, end_px: f32) {
        self.end_pos = end_px;
    }

    /// One periodic tick: advance by `step_px` and auto-stop past the end.
    /// Returns whether the overlay changed (a re-render request).
    pub fn tick(&mut self, step_px: f32, scheduler: &mut dyn Scheduler) -> bool {
        if !self.running {
            return false;
        }
        self.progress_pos += step_px;
        if self.progress_pos > self.end_pos {
            self.stop(scheduler);
        }
        true
    }

    /// Cancel and release the timer. Idempotent.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        self.running = false;
        if let Some(token) = self.timer.take() {
            scheduler.cancel(token);
        }
    }

    /// Reset progress to the start position, then stop.
    pub fn clear(&mut self, scheduler: &mut dyn Scheduler) {
        self.progress_pos = self.start_pos;
        self.stop(scheduler);
    }
}
