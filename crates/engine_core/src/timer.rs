//! Timers for state transitions that span many frames.
//!
//! Both types are advanced explicitly once per tick, so no callbacks reschedule
//! themselves and every phase can be inspected between frames.

use std::time::Duration;

/// A phase of fixed length with linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimer {
    elapsed: Duration,
    duration: Duration,
}

impl PhaseTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Advance by `dt`. Returns true on the tick that completes the phase.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let was_finished = self.is_finished();
        self.elapsed = (self.elapsed + dt).min(self.duration);
        !was_finished && self.is_finished()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Fraction complete in [0, 1]. A zero-length phase is always complete.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Lifetime countdown for temporary state (respawns, hidden targets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining: duration,
        }
    }

    /// Count down by `dt`. Returns true once the countdown has run out.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        self.remaining.is_zero()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }
}
