//! Short-lived presentation effects: barrel recoil, explosions and craters.
//!
//! Each effect is a small state machine advanced by the simulation tick; the
//! presentation layer only reads offsets, scales and opacities from it.

use engine_core::PhaseTimer;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Barrel-local axis the barrel slides back along when firing.
pub const RECOIL_AXIS: Vec3 = Vec3::new(-0.5, -2.0, 0.0);

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Barrel kick after a shot, easing back to rest.
#[derive(Debug, Clone, Copy)]
pub struct Recoil {
    phase: PhaseTimer,
    distance: f32,
}

impl Recoil {
    pub fn new(duration: Duration, distance: f32) -> Self {
        Self {
            phase: PhaseTimer::new(duration),
            distance,
        }
    }

    pub fn advance(&mut self, dt: Duration) -> bool {
        self.phase.advance(dt)
    }

    /// Barrel-local displacement from the rest position.
    pub fn offset(&self) -> Vec3 {
        let eased = ease_out_cubic(self.phase.progress());
        RECOIL_AXIS * ((1.0 - eased) * self.distance)
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }
}

/// Expanding, fading fireball at an impact point.
#[derive(Debug, Clone, Copy)]
pub struct Explosion {
    pub position: Vec3,
    phase: PhaseTimer,
}

impl Explosion {
    pub fn new(position: Vec3, duration: Duration) -> Self {
        Self {
            position,
            phase: PhaseTimer::new(duration),
        }
    }

    /// Uniform scale: grows by two units per second.
    pub fn scale(&self) -> f32 {
        1.0 + self.phase.elapsed().as_secs_f32() * 2.0
    }

    pub fn opacity(&self) -> f32 {
        1.0 - self.phase.progress()
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }
}

/// Craters kept by default before the oldest are cleared.
pub const DEFAULT_MAX_CRATERS: usize = 256;

/// Scorch mark left on the ground by an impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crater {
    pub position: Vec3,
    pub radius: f32,
}

/// All running effects.
#[derive(Debug, Clone)]
pub struct Effects {
    recoil: Option<Recoil>,
    explosions: Vec<Explosion>,
    craters: Vec<Crater>,
    recoil_duration: Duration,
    recoil_distance: f32,
    explosion_duration: Duration,
    max_craters: usize,
    rng: StdRng,
}

impl Effects {
    pub fn new(recoil_duration: Duration, recoil_distance: f32, explosion_duration: Duration, seed: u64) -> Self {
        Self {
            recoil: None,
            explosions: Vec::new(),
            craters: Vec::new(),
            recoil_duration,
            recoil_distance,
            explosion_duration,
            max_craters: DEFAULT_MAX_CRATERS,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Keep at most `max_craters` craters; older ones are cleared first.
    pub fn with_crater_limit(mut self, max_craters: usize) -> Self {
        self.max_craters = max_craters;
        self
    }

    /// Restart the recoil animation.
    pub fn on_shot(&mut self) {
        self.recoil = Some(Recoil::new(self.recoil_duration, self.recoil_distance));
    }

    /// Spawn an explosion and a crater under it.
    pub fn on_impact(&mut self, position: Vec3) {
        self.explosions.push(Explosion::new(position, self.explosion_duration));
        // Lifted slightly so the decal does not z-fight the ground.
        self.craters.push(Crater {
            position: Vec3::new(position.x, 0.01, position.z),
            radius: 0.5 + self.rng.gen::<f32>() * 0.3,
        });
        if self.craters.len() > self.max_craters {
            let excess = self.craters.len() - self.max_craters;
            self.craters.drain(..excess);
        }
    }

    pub fn update(&mut self, dt: Duration) {
        if let Some(recoil) = self.recoil.as_mut() {
            recoil.advance(dt);
            if recoil.is_finished() {
                self.recoil = None;
            }
        }
        for explosion in &mut self.explosions {
            explosion.phase.advance(dt);
        }
        self.explosions.retain(|e| !e.is_finished());
    }

    /// Current barrel offset; zero when at rest.
    pub fn recoil_offset(&self) -> Vec3 {
        self.recoil.map(|r| r.offset()).unwrap_or(Vec3::ZERO)
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn craters(&self) -> &[Crater] {
        &self.craters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effects(seed: u64) -> Effects {
        Effects::new(Duration::from_millis(200), 0.6, Duration::from_millis(500), seed)
    }

    #[test]
    fn recoil_starts_at_full_kick_and_settles() {
        let mut fx = effects(1);
        fx.on_shot();
        assert!((fx.recoil_offset() - RECOIL_AXIS * 0.6).length() < 1e-6);
        fx.update(Duration::from_millis(100));
        let mid = fx.recoil_offset().length();
        assert!(mid > 0.0 && mid < (RECOIL_AXIS * 0.6).length() * 0.5);
        fx.update(Duration::from_millis(100));
        assert_eq!(fx.recoil_offset(), Vec3::ZERO);
    }

    #[test]
    fn explosion_grows_fades_and_expires() {
        let mut fx = effects(1);
        fx.on_impact(Vec3::new(4.0, -0.2, 9.0));
        fx.update(Duration::from_millis(250));
        let e = fx.explosions()[0];
        assert!((e.scale() - 1.5).abs() < 1e-5);
        assert!((e.opacity() - 0.5).abs() < 1e-5);
        fx.update(Duration::from_millis(250));
        assert!(fx.explosions().is_empty());
    }

    #[test]
    fn craters_sit_on_ground_and_persist() {
        let mut fx = effects(1);
        fx.on_impact(Vec3::new(4.0, -0.2, 9.0));
        fx.update(Duration::from_secs(60));
        let c = fx.craters()[0];
        assert_eq!(c.position, Vec3::new(4.0, 0.01, 9.0));
        assert!((0.5..0.8).contains(&c.radius));
    }

    #[test]
    fn oldest_craters_are_cleared_past_the_limit() {
        let mut fx = effects(3).with_crater_limit(3);
        for i in 0..5 {
            fx.on_impact(Vec3::new(i as f32, 0.0, 0.0));
        }
        let xs: Vec<f32> = fx.craters().iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn crater_sizes_repeat_for_a_seed() {
        let mut a = effects(42);
        let mut b = effects(42);
        for i in 0..5 {
            a.on_impact(Vec3::splat(i as f32));
            b.on_impact(Vec3::splat(i as f32));
        }
        assert_eq!(a.craters(), b.craters());
    }
}
