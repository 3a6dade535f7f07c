//! Barrel wear and the timed repair state machine.

use std::time::Duration;

use crate::Rejection;

/// Wear at which the barrel is locked out.
pub const MAX_WEAR: f32 = 100.0;
/// Fraction of muzzle power left at full wear.
pub const MIN_POWER_FACTOR: f32 = 0.4;
/// Time a repair takes.
pub const REPAIR_DURATION: Duration = Duration::from_millis(3000);

/// Coarse barrel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrelState {
    Ready,
    Repairing,
    Worn,
}

/// A running repair, timed from the moment it was requested.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Repair {
    started: Duration,
    progress: f32,
}

/// Wear accumulated by the barrel, plus any repair in progress.
///
/// Wear only grows between repairs and is reset to exactly zero when a repair
/// completes. A repair cannot be cancelled.
#[derive(Debug, Clone)]
pub struct BarrelCondition {
    wear: f32,
    max_wear: f32,
    min_power_factor: f32,
    repair_duration: Duration,
    repair: Option<Repair>,
}

impl Default for BarrelCondition {
    fn default() -> Self {
        Self::new(MAX_WEAR, MIN_POWER_FACTOR, REPAIR_DURATION)
    }
}

impl BarrelCondition {
    pub fn new(max_wear: f32, min_power_factor: f32, repair_duration: Duration) -> Self {
        Self {
            wear: 0.0,
            max_wear,
            min_power_factor: min_power_factor.clamp(0.0, 1.0),
            repair_duration,
            repair: None,
        }
    }

    /// Start from an already used barrel.
    pub fn with_wear(mut self, wear: f32) -> Self {
        self.wear = wear.clamp(0.0, self.max_wear);
        self
    }

    pub fn state(&self) -> BarrelState {
        if self.repair.is_some() {
            BarrelState::Repairing
        } else if self.wear >= self.max_wear {
            BarrelState::Worn
        } else {
            BarrelState::Ready
        }
    }

    pub fn can_fire(&self) -> bool {
        self.state() == BarrelState::Ready
    }

    pub fn is_repairing(&self) -> bool {
        self.repair.is_some()
    }

    pub fn is_worn(&self) -> bool {
        self.wear >= self.max_wear
    }

    pub fn current_wear(&self) -> f32 {
        self.wear
    }

    pub fn max_wear(&self) -> f32 {
        self.max_wear
    }

    /// Wear as a percentage of the limit.
    pub fn wear_percent(&self) -> f32 {
        if self.max_wear <= 0.0 {
            return 100.0;
        }
        self.wear / self.max_wear * 100.0
    }

    /// Add one shot's wear, clamped to the limit. Returns the new wear.
    /// Ignored unless the barrel can fire.
    pub fn record_shot(&mut self, wear: f32) -> f32 {
        if self.can_fire() {
            self.wear = (self.wear + wear.max(0.0)).min(self.max_wear);
            if self.is_worn() {
                log::info!("Barrel worn out, repair required");
            }
        }
        self.wear
    }

    /// Muzzle power multiplier for the current wear: 1.0 when new,
    /// `min_power_factor` when worn out.
    pub fn wear_factor(&self) -> f32 {
        if self.max_wear <= 0.0 {
            return self.min_power_factor;
        }
        1.0 - (self.wear / self.max_wear) * (1.0 - self.min_power_factor)
    }

    /// Begin a repair at time `now`, reporting why it was refused.
    pub fn start_repair(&mut self, now: Duration) -> Result<(), Rejection> {
        if self.is_repairing() {
            return Err(Rejection::AlreadyRepairing);
        }
        if self.wear == 0.0 {
            return Err(Rejection::NothingToRepair);
        }
        log::info!("Barrel repair started at {:.0}% wear", self.wear_percent());
        self.repair = Some(Repair {
            started: now,
            progress: 0.0,
        });
        Ok(())
    }

    pub fn try_start_repair(&mut self, now: Duration) -> bool {
        self.start_repair(now).is_ok()
    }

    /// Sample a running repair at time `now`. Returns its progress in [0, 1],
    /// or `None` when no repair is running. The completing tick returns
    /// `Some(1.0)` and leaves the barrel `Ready` with zero wear.
    pub fn tick(&mut self, now: Duration) -> Option<f32> {
        let repair_duration = self.repair_duration;
        let repair = self.repair.as_mut()?;
        let elapsed = now.saturating_sub(repair.started);
        if elapsed >= repair_duration {
            self.repair = None;
            self.wear = 0.0;
            log::info!("Barrel repair complete");
            return Some(1.0);
        }
        repair.progress = (elapsed.as_secs_f64() / repair_duration.as_secs_f64()) as f32;
        Some(repair.progress)
    }

    /// Progress of the running repair in [0, 1], as of the last tick.
    pub fn repair_progress(&self) -> Option<f32> {
        self.repair.map(|r| r.progress)
    }
}
