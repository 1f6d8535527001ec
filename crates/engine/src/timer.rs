//! One-shot drop timer
//!
//! The board never waits: it asks for a gravity step after some delay. The
//! engine keeps a single pending deadline, so a new request replaces the old
//! one, which is how a lock delay is cancelled.

use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropTimer {
    remaining_ms: Option<u32>,
}

impl DropTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending deadline
    pub fn arm(&mut self, delay_ms: u32) {
        self.remaining_ms = Some(delay_ms);
    }

    /// Arm from a [`Duration`], clamped to `u32::MAX` milliseconds
    pub fn arm_duration(&mut self, delay: Duration) {
        self.arm(u32::try_from(delay.as_millis()).unwrap_or(u32::MAX));
    }

    pub fn disarm(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn remaining_ms(&self) -> Option<u32> {
        self.remaining_ms
    }

    /// Advance the clock. Returns true exactly once, when the deadline
    /// passes; the timer is idle afterwards.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        match self.remaining_ms {
            Some(remaining) if elapsed_ms >= remaining => {
                self.remaining_ms = None;
                true
            }
            Some(remaining) => {
                self.remaining_ms = Some(remaining - elapsed_ms);
                false
            }
            None => false,
        }
    }
}
