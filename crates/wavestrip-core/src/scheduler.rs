//! Timer scheduling abstraction
//!
//! The engine never owns a thread or an OS timer. It asks a [`Scheduler`]
//! for periodic or deferred timers and the host delivers the resulting
//! ticks back through [`crate::SelectorController::handle_timer`]. A tick
//! delivered for a token that has since been cancelled is ignored by its
//! owner, so a late callback can never mutate state after release.
//!
//! [`TimerWheel`] is the bundled poll-driven implementation: hosts with a
//! frame tick (and the tests, with a hand-advanced clock) call
//! [`TimerWheel::poll`] and fan the due tokens out.

/// Opaque identity of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Host-provided timer scheduling.
pub trait Scheduler {
    /// Start a periodic timer firing every `interval_ms`.
    fn schedule_periodic(&mut self, interval_ms: u64) -> TimerToken;

    /// Schedule a single invocation on the next scheduler pass.
    fn schedule_deferred(&mut self) -> TimerToken;

    /// Cancel a timer. Cancelling an unknown token is a no-op.
    fn cancel(&mut self, token: TimerToken);
}

#[derive(Debug, Clone, Copy)]
struct WheelEntry {
    token: TimerToken,
    /// `None` for one-shot deferred entries.
    interval_ms: Option<u64>,
    due_ms: u64,
}

/// Deterministic poll-driven [`Scheduler`].
///
/// Time only advances when [`poll`](Self::poll) is called, which makes the
/// wheel double as the manual clock for tests.
#[derive(Debug, Default)]
pub struct TimerWheel {
    next_id: u64,
    now_ms: u64,
    entries: Vec<WheelEntry>,
}

impl TimerWheel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now_ms` and collect every tick due since the last poll.
    ///
    /// Periodic timers that fell multiple intervals behind yield one token
    /// per missed interval, oldest first.
    pub fn poll(&mut self, now_ms: u64) -> Vec<TimerToken> {
        self.now_ms = now_ms.max(self.now_ms);
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            let entry = &mut self.entries[i];
            match entry.interval_ms {
                Some(interval) => {
                    while entry.due_ms <= self.now_ms {
                        due.push(entry.token);
                        entry.due_ms += interval.max(1);
                    }
                    i += 1;
                }
                None => {
                    if entry.due_ms <= self.now_ms {
                        due.push(entry.token);
                        self.entries.swap_remove(i);
                    } else {
                        i += 1;
                    }
                }
            }
        }
        due
    }

    pub fn is_scheduled(&self, token: TimerToken) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }

    fn next_token(&mut self) -> TimerToken {
        self.next_id += 1;
        TimerToken(self.next_id)
    }
}

impl Scheduler for TimerWheel {
    fn schedule_periodic(&mut self, interval_ms: u64) -> TimerToken {
        let token = self.next_token();
        self.entries.push(WheelEntry {
            token,
            interval_ms: Some(interval_ms.max(1)),
            due_ms: self.now_ms + interval_ms.max(1),
        });
        token
    }

    fn schedule_deferred(&mut self) -> TimerToken {
        let token = self.next_token();
        self.entries.push(WheelEntry {
            token,
            interval_ms: None,
            due_ms: self.now_ms,
        });
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.entries.retain(|e| e.token != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_fires_per_interval() {
        let mut wheel = TimerWheel::new();
        let t = wheel.schedule_periodic(200);
        assert!(wheel.poll(100).is_empty());
        assert_eq!(wheel.poll(200), vec![t]);
        // Two intervals elapsed at once: two ticks, still scheduled
        assert_eq!(wheel.poll(600), vec![t, t]);
        assert!(wheel.is_scheduled(t));
    }

    #[test]
    fn test_deferred_fires_once() {
        let mut wheel = TimerWheel::new();
        wheel.poll(50);
        let t = wheel.schedule_deferred();
        assert_eq!(wheel.poll(50), vec![t]);
        assert!(wheel.poll(100).is_empty());
        assert!(!wheel.is_scheduled(t));
    }

    #[test]
    fn test_cancel_silences_timer() {
        let mut wheel = TimerWheel::new();
        let t = wheel.schedule_periodic(100);
        wheel.cancel(t);
        assert!(wheel.poll(1000).is_empty());
        // Cancelling again is harmless
        wheel.cancel(t);
    }
}
