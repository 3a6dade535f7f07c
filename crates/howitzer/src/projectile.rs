//! Shells in flight: integration, impact detection and lifecycle.

use glam::Vec3;
use physics::{BoundingVolume, GroundPlane};
use std::time::Duration;

use crate::events::SimEvent;
use crate::target::TargetRegistry;
use crate::PowderKind;

/// Unique per shot, never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u64);

/// A shell fired from the howitzer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub id: ProjectileId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Clock time the shell left the muzzle.
    pub spawned_at: Duration,
    pub powder: PowderKind,
}

/// Owns every live shell. Shells leave the set on their first terminal event.
#[derive(Debug, Clone)]
pub struct ProjectileSimulation {
    live: Vec<Projectile>,
    gravity: Vec3,
    volume: BoundingVolume,
}

impl Default for ProjectileSimulation {
    fn default() -> Self {
        Self::new(physics::GRAVITY, BoundingVolume::sphere(0.1))
    }
}

impl ProjectileSimulation {
    pub fn new(gravity: Vec3, volume: BoundingVolume) -> Self {
        Self {
            live: Vec::new(),
            gravity,
            volume,
        }
    }

    pub fn spawn(&mut self, projectile: Projectile) {
        self.live.push(projectile);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.live.iter()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.live.iter().map(|p| p.position).collect()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Advance every shell by `dt` seconds.
    ///
    /// Shells are visited from the back so removal by index never skips one.
    /// A target hit is checked before the ground, and a hit target is hidden
    /// immediately so later shells in the same step pass through it.
    pub fn step(
        &mut self,
        dt: f32,
        wind: Vec3,
        targets: &mut TargetRegistry,
        ground: &GroundPlane,
    ) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if !(dt > 0.0) {
            return events;
        }

        for i in (0..self.live.len()).rev() {
            let shell = &mut self.live[i];
            physics::integrate_step(&mut shell.position, &mut shell.velocity, self.gravity, wind, dt);
            let (id, position) = (shell.id, shell.position);

            if let Some(target) = targets.first_hit(position, &self.volume) {
                targets.mark_hit(target);
                events.push(SimEvent::TargetHit {
                    target,
                    projectile: id,
                    position,
                });
                self.live.remove(i);
            } else if ground.is_impact(position) {
                log::debug!("Shell {} impacted at {:?}", id.0, position);
                events.push(SimEvent::GroundImpact { projectile: id, position });
                self.live.remove(i);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::TargetId;

    fn shell(id: u64, position: Vec3, velocity: Vec3) -> Projectile {
        Projectile {
            id: ProjectileId(id),
            position,
            velocity,
            spawned_at: Duration::ZERO,
            powder: PowderKind::Nitro,
        }
    }

    #[test]
    fn falling_shell_impacts_ground_once() {
        let mut sim = ProjectileSimulation::default();
        let mut targets = TargetRegistry::default();
        let ground = GroundPlane::default();
        sim.spawn(shell(1, Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO));

        let mut impacts = 0;
        for _ in 0..300 {
            let events = sim.step(1.0 / 60.0, Vec3::ZERO, &mut targets, &ground);
            for event in &events {
                if let SimEvent::GroundImpact { position, .. } = event {
                    assert!(position.y <= 0.0);
                    impacts += 1;
                    assert!(sim.is_empty());
                }
            }
        }
        assert_eq!(impacts, 1);
    }

    #[test]
    fn shell_hits_visible_target_once() {
        let mut sim = ProjectileSimulation::default();
        let mut targets = TargetRegistry::default();
        targets.add(Vec3::new(10.0, 5.0, 0.0), BoundingVolume::cuboid(Vec3::ONE));
        let ground = GroundPlane::default();
        sim.spawn(shell(7, Vec3::new(0.0, 5.0, 0.0), Vec3::new(60.0, 0.0, 0.0)));

        let mut hits = Vec::new();
        for _ in 0..30 {
            for event in sim.step(1.0 / 60.0, Vec3::ZERO, &mut targets, &ground) {
                if let SimEvent::TargetHit { target, projectile, .. } = event {
                    hits.push((target, projectile));
                }
            }
        }
        assert_eq!(hits, vec![(TargetId(0), ProjectileId(7))]);
        assert!(sim.is_empty());
        assert!(!targets.get(TargetId(0)).unwrap().is_visible());
    }

    #[test]
    fn shell_passes_through_hidden_target() {
        let mut sim = ProjectileSimulation::default();
        let mut targets = TargetRegistry::default();
        let id = targets.add(Vec3::new(10.0, 5.0, 0.0), BoundingVolume::cuboid(Vec3::ONE));
        targets.mark_hit(id);
        let ground = GroundPlane::default();
        sim.spawn(shell(1, Vec3::new(0.0, 5.0, 0.0), Vec3::new(60.0, 0.0, 0.0)));

        for _ in 0..20 {
            let events = sim.step(1.0 / 60.0, Vec3::ZERO, &mut targets, &ground);
            assert!(events.iter().all(|e| !matches!(e, SimEvent::TargetHit { .. })));
        }
        assert_eq!(sim.len(), 1);
        assert!(sim.positions()[0].x > 12.0);
    }

    #[test]
    fn target_check_wins_over_ground() {
        let mut sim = ProjectileSimulation::default();
        let mut targets = TargetRegistry::default();
        targets.add(Vec3::new(0.0, 0.0, 0.0), BoundingVolume::cuboid(Vec3::ONE));
        let ground = GroundPlane::default();
        sim.spawn(shell(1, Vec3::new(0.0, 0.05, 0.0), Vec3::new(0.0, -10.0, 0.0)));

        let events = sim.step(0.1, Vec3::ZERO, &mut targets, &ground);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SimEvent::TargetHit { .. }));
    }

    #[test]
    fn removal_keeps_other_shells_in_order() {
        let mut sim = ProjectileSimulation::default();
        let mut targets = TargetRegistry::default();
        let ground = GroundPlane::default();
        sim.spawn(shell(1, Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO));
        sim.spawn(shell(2, Vec3::new(0.0, 0.01, 0.0), Vec3::ZERO));
        sim.spawn(shell(3, Vec3::new(0.0, 60.0, 0.0), Vec3::ZERO));

        let events = sim.step(0.05, Vec3::ZERO, &mut targets, &ground);
        assert_eq!(events.len(), 1);
        let ids: Vec<_> = sim.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProjectileId(1), ProjectileId(3)]);
    }

    #[test]
    fn calm_wind_adds_no_drift() {
        let mut targets = TargetRegistry::default();
        let ground = GroundPlane::default();
        let mut calm = ProjectileSimulation::default();
        let mut none = ProjectileSimulation::default();
        let start = shell(1, Vec3::new(0.0, 100.0, 0.0), Vec3::new(3.0, 20.0, -4.0));
        calm.spawn(start);
        none.spawn(start);
        let zero_strength = crate::wind::Wind::vector_for(271.0, 0.0, 10.0);
        for _ in 0..60 {
            calm.step(1.0 / 60.0, zero_strength, &mut targets, &ground);
            none.step(1.0 / 60.0, Vec3::ZERO, &mut targets, &ground);
        }
        assert_eq!(calm.positions(), none.positions());
    }

    #[test]
    fn wind_drifts_shell_downwind() {
        let mut targets = TargetRegistry::default();
        let ground = GroundPlane::default();
        let mut sim = ProjectileSimulation::default();
        sim.spawn(shell(1, Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO));
        for _ in 0..60 {
            sim.step(1.0 / 60.0, Vec3::new(0.0, 0.0, 5.0), &mut targets, &ground);
        }
        assert!(sim.positions()[0].z > 2.0);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut sim = ProjectileSimulation::default();
        let mut targets = TargetRegistry::default();
        sim.spawn(shell(1, Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO));
        let events = sim.step(0.0, Vec3::ZERO, &mut targets, &GroundPlane::default());
        assert!(events.is_empty());
        assert_eq!(sim.len(), 1);
    }
}
