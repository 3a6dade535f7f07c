//! Shot gating and muzzle ballistics.
//!
//! This is where powder choice, barrel wear and gun geometry meet: the
//! controller refuses shots from a worn barrel or during cooldown, applies
//! the shot's wear, and launches a shell from the muzzle at the resulting speed.

use engine_core::Transform;
use glam::Vec3;
use std::time::Duration;

use crate::barrel::BarrelCondition;
use crate::powder::{PowderKind, PowderProfile};
use crate::projectile::{Projectile, ProjectileId};
use crate::Rejection;

/// Default minimum interval between shots.
pub const SHOT_COOLDOWN: Duration = Duration::from_millis(1000);

/// Where shells leave the barrel, in barrel-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuzzleGeometry {
    pub offset: Vec3,
    /// Bore axis; normalized on use.
    pub direction: Vec3,
}

impl Default for MuzzleGeometry {
    fn default() -> Self {
        Self {
            offset: Vec3::new(2.5, 5.0, 1.55),
            direction: Vec3::new(1.0, 2.4, 0.0),
        }
    }
}

impl MuzzleGeometry {
    /// World-space spawn point and unit launch direction for a barrel transform.
    pub fn world_spawn(&self, barrel: &Transform) -> (Vec3, Vec3) {
        let start = barrel.transform_point(self.offset);
        let direction = barrel.transform_direction(self.direction).normalize_or_zero();
        (start, direction)
    }
}

/// Outcome of a fire command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireResult {
    Fired(Projectile),
    Rejected(Rejection),
}

impl FireResult {
    pub fn projectile(&self) -> Option<&Projectile> {
        match self {
            FireResult::Fired(p) => Some(p),
            FireResult::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            FireResult::Fired(_) => None,
            FireResult::Rejected(r) => Some(*r),
        }
    }
}

/// Cooldown state and shell bookkeeping.
#[derive(Debug, Clone)]
pub struct FiringController {
    last_shot: Option<Duration>,
    cooldown: Duration,
    geometry: MuzzleGeometry,
    next_id: u64,
}

impl Default for FiringController {
    fn default() -> Self {
        Self::new(SHOT_COOLDOWN, MuzzleGeometry::default())
    }
}

impl FiringController {
    pub fn new(cooldown: Duration, geometry: MuzzleGeometry) -> Self {
        Self {
            last_shot: None,
            cooldown,
            geometry,
            next_id: 0,
        }
    }

    /// Try to fire at time `now`.
    ///
    /// The barrel check comes first, so a worn or repairing barrel reports
    /// `Worn` even while reloading. A rejected shot changes nothing. The wind
    /// does not affect the launch; it acts on the shell in flight.
    pub fn fire(
        &mut self,
        now: Duration,
        powder: (PowderKind, PowderProfile),
        barrel: &mut BarrelCondition,
        _wind: Vec3,
        muzzle: &Transform,
    ) -> FireResult {
        if !barrel.can_fire() {
            log::debug!("Shot rejected: barrel worn or under repair");
            return FireResult::Rejected(Rejection::Worn);
        }
        if self.is_cooling_down(now) {
            log::debug!("Shot rejected: reloading");
            return FireResult::Rejected(Rejection::Cooldown);
        }

        let (kind, profile) = powder;
        self.last_shot = Some(now);
        // Wear lands before the speed is computed: the shot that wears the
        // barrel is already weakened by it.
        barrel.record_shot(profile.wear_per_shot);
        let muzzle_speed = profile.speed * barrel.wear_factor();
        let (start, direction) = self.geometry.world_spawn(muzzle);

        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        log::info!(
            "Fired shell {} ({}) at {:.2} m/s, barrel wear {:.0}%",
            id.0,
            kind,
            muzzle_speed,
            barrel.wear_percent()
        );

        FireResult::Fired(Projectile {
            id,
            position: start,
            velocity: direction * muzzle_speed,
            spawned_at: now,
            powder: kind,
        })
    }

    fn is_cooling_down(&self, now: Duration) -> bool {
        match self.last_shot {
            Some(last) => now.saturating_sub(last) < self.cooldown,
            None => false,
        }
    }

    /// Reload progress in [0, 1]; 1 before the first shot.
    pub fn reload_progress(&self, now: Duration) -> f32 {
        match self.last_shot {
            Some(_) if self.cooldown.is_zero() => 1.0,
            Some(last) => {
                let since = now.saturating_sub(last).as_secs_f64();
                (since / self.cooldown.as_secs_f64()).min(1.0) as f32
            }
            None => 1.0,
        }
    }

    pub fn last_shot(&self) -> Option<Duration> {
        self.last_shot
    }

    pub fn shots_fired(&self) -> u64 {
        self.next_id
    }

    pub fn geometry(&self) -> &MuzzleGeometry {
        &self.geometry
    }
}
