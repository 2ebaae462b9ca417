//! Leading-edge throttle gate.

use bevy::prelude::*;
use std::time::Duration;

/// Passes the first call of a quiescent window through immediately, then
/// drops every further call until `interval` has elapsed.
///
/// Dropped calls are lost, never queued - there is no trailing delivery.
/// Because the gate fires synchronously on the leading edge, nothing is ever
/// in flight; [`cancel`](Self::cancel) simply reopens the gate.
pub struct Throttle {
    timer: Timer,
    suppressing: bool,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            timer: Timer::new(interval, TimerMode::Once),
            suppressing: false,
        }
    }

    /// Gate a call. Returns the payload when the gate is open (the caller
    /// acts on it immediately), `None` inside a suppression window.
    pub fn accept<T>(&mut self, payload: T) -> Option<T> {
        if self.suppressing {
            return None;
        }
        self.suppressing = true;
        self.timer.reset();
        Some(payload)
    }

    /// Advance the suppression window.
    pub fn tick(&mut self, delta: Duration) {
        if self.suppressing && self.timer.tick(delta).just_finished() {
            self.suppressing = false;
        }
    }

    /// Reopen the gate immediately.
    pub fn cancel(&mut self) {
        self.suppressing = false;
        self.timer.reset();
    }

    #[allow(dead_code)]
    pub fn is_suppressing(&self) -> bool {
        self.suppressing
    }
}
