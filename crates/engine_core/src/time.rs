//! Time management for the simulation loop.
//!
//! Timestamps are [`Duration`]s measured from a clock's origin, which keeps
//! cooldowns and repair timers wall-clock relative and lets tests drive time
//! by hand with [`ManualClock`].

use std::time::Duration;

/// A monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Hand-driven clock for deterministic runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }

    /// Move time forward by a number of milliseconds.
    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Result of advancing the [`FrameTimer`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Unclamped wall-clock time since the previous frame. Drives timers.
    pub wall_delta: Duration,
    /// Integration step in seconds. Clamped, or the fixed step size.
    pub dt: f32,
    /// Number of integration steps of `dt` to run this frame.
    pub substeps: u32,
}

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct FrameTimer {
    /// Timestamp of the last frame, `None` before the first one.
    last_frame: Option<Duration>,
    /// Frame count since start.
    frame_count: u64,
    /// Upper bound on a variable integration step, in seconds.
    max_delta: f32,
    /// Fixed integration step. `None` means variable, clamped steps.
    fixed_timestep: Option<Duration>,
    /// Cap on fixed substeps per frame.
    max_substeps: u32,
    /// Accumulated time for fixed updates.
    accumulator: Duration,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FrameTimer {
    /// Create a variable-step timer that clamps each step to `max_delta` seconds.
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_frame: None,
            frame_count: 0,
            max_delta: max_delta.max(0.0),
            fixed_timestep: None,
            max_substeps: 8,
            accumulator: Duration::ZERO,
        }
    }

    /// Switch to fixed-step integration at `hz` with at most `max_substeps` per frame.
    pub fn with_fixed_rate(mut self, hz: f64, max_substeps: u32) -> Self {
        if hz > 0.0 {
            self.fixed_timestep = Some(Duration::from_secs_f64(1.0 / hz));
            self.max_substeps = max_substeps.max(1);
        }
        self
    }

    /// Update timing at the start of a new frame.
    ///
    /// The first frame has a zero delta. A timestamp earlier than the previous
    /// one is treated as zero elapsed time.
    pub fn update(&mut self, now: Duration) -> FrameStep {
        let wall_delta = match self.last_frame {
            Some(last) => now.saturating_sub(last),
            None => Duration::ZERO,
        };
        self.last_frame = Some(now);
        self.frame_count += 1;

        match self.fixed_timestep {
            None => {
                let dt = wall_delta.as_secs_f32().min(self.max_delta);
                FrameStep {
                    wall_delta,
                    dt,
                    substeps: u32::from(dt > 0.0),
                }
            }
            Some(step) => {
                self.accumulator += wall_delta;
                let mut substeps = 0;
                while self.accumulator >= step && substeps < self.max_substeps {
                    self.accumulator -= step;
                    substeps += 1;
                }
                // Drop backlog past the cap so a long stall does not spiral.
                if substeps == self.max_substeps && self.accumulator >= step {
                    log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
                    self.accumulator = Duration::ZERO;
                }
                FrameStep {
                    wall_delta,
                    dt: step.as_secs_f32(),
                    substeps,
                }
            }
        }
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let mut clock = ManualClock::new();
        clock.advance_ms(250);
        clock.advance(Duration::from_millis(750));
        assert_eq!(clock.now(), Duration::from_secs(1));
    }

    #[test]
    fn first_frame_has_no_step() {
        let mut timer = FrameTimer::new(0.1);
        let step = timer.update(Duration::from_secs(3));
        assert_eq!(step.wall_delta, Duration::ZERO);
        assert_eq!(step.substeps, 0);
    }

    #[test]
    fn variable_step_is_clamped_but_wall_delta_is_not() {
        let mut timer = FrameTimer::new(0.1);
        timer.update(Duration::ZERO);
        let step = timer.update(Duration::from_secs(5));
        assert_eq!(step.wall_delta, Duration::from_secs(5));
        assert!((step.dt - 0.1).abs() < 1e-6);
        assert_eq!(step.substeps, 1);
    }

    #[test]
    fn fixed_step_accumulates_remainder() {
        let mut timer = FrameTimer::new(0.1).with_fixed_rate(100.0, 8);
        timer.update(Duration::ZERO);
        let step = timer.update(Duration::from_millis(25));
        assert_eq!(step.substeps, 2);
        let step = timer.update(Duration::from_millis(30));
        assert_eq!(step.substeps, 1);
    }

    #[test]
    fn fixed_step_caps_substeps() {
        let mut timer = FrameTimer::new(0.1).with_fixed_rate(60.0, 4);
        timer.update(Duration::ZERO);
        let step = timer.update(Duration::from_secs(2));
        assert_eq!(step.substeps, 4);
        let step = timer.update(Duration::from_secs(2));
        assert_eq!(step.substeps, 0);
    }

    #[test]
    fn backwards_time_is_zero_delta() {
        let mut timer = FrameTimer::new(0.1);
        timer.update(Duration::from_secs(2));
        let step = timer.update(Duration::from_secs(1));
        assert_eq!(step.wall_delta, Duration::ZERO);
        assert_eq!(timer.frame_count(), 2);
    }
}
