//! Trailing-edge debounce over an owned timer.

use bevy::prelude::*;
use std::time::Duration;

/// Collapses a burst of calls into a single delayed delivery.
///
/// Each [`call`](Self::call) replaces the pending payload and restarts the
/// wait window, so only the most recent payload is ever delivered - `wait`
/// after the last call of the burst. If calls keep arriving faster than
/// `wait` apart, nothing fires.
///
/// The timer is owned by this value: dropping it or calling
/// [`cancel`](Self::cancel) guarantees the pending delivery never happens.
pub struct Debounce<T> {
    timer: Timer,
    pending: Option<T>,
}

impl<T> Debounce<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            timer: Timer::new(wait, TimerMode::Once),
            pending: None,
        }
    }

    /// Record a call. Any previously pending payload is discarded.
    pub fn call(&mut self, payload: T) {
        self.pending = Some(payload);
        self.timer.reset();
    }

    /// Advance the wait window; returns the payload when it fires.
    pub fn tick(&mut self, delta: Duration) -> Option<T> {
        self.pending.as_ref()?;
        if self.timer.tick(delta).just_finished() {
            self.pending.take()
        } else {
            None
        }
    }

    /// Discard the pending payload without delivering it.
    #[allow(dead_code)]
    pub fn cancel(&mut self) {
        self.pending = None;
        self.timer.reset();
    }

    #[allow(dead_code)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_after_wait() {
        let mut debounce = Debounce::new(WAIT);
        debounce.call(1);
        assert_eq!(debounce.tick(Duration::from_millis(299)), None);
        assert_eq!(debounce.tick(Duration::from_millis(1)), Some(1));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_burst_delivers_last_payload_once() {
        let mut debounce = Debounce::new(WAIT);
        for value in 1..=5 {
            debounce.call(value);
            assert_eq!(debounce.tick(Duration::from_millis(100)), None);
        }
        // 300ms after the last call, only the last payload arrives
        assert_eq!(debounce.tick(Duration::from_millis(200)), Some(5));
        assert_eq!(debounce.tick(WAIT), None);
    }

    #[test]
    fn test_each_call_restarts_the_window() {
        let mut debounce = Debounce::new(WAIT);
        debounce.call(1);
        debounce.tick(Duration::from_millis(200));
        debounce.call(2);
        // only 200ms since the second call
        assert_eq!(debounce.tick(Duration::from_millis(200)), None);
        assert_eq!(debounce.tick(Duration::from_millis(100)), Some(2));
    }

    #[test]
    fn test_idle_ticks_deliver_nothing() {
        let mut debounce: Debounce<u32> = Debounce::new(WAIT);
        assert_eq!(debounce.tick(Duration::from_secs(10)), None);
    }

    #[test]
    fn test_cancel_suppresses_delivery() {
        let mut debounce = Debounce::new(WAIT);
        debounce.call(7);
        debounce.cancel();
        assert!(!debounce.is_pending());
        assert_eq!(debounce.tick(Duration::from_secs(10)), None);
    }

    #[test]
    fn test_reusable_after_firing() {
        let mut debounce = Debounce::new(WAIT);
        debounce.call(1);
        assert_eq!(debounce.tick(WAIT), Some(1));
        debounce.call(2);
        assert_eq!(debounce.tick(WAIT), Some(2));
    }
}
