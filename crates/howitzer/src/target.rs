//! Pre-placed targets that hide when hit and respawn after a delay.

use engine_core::Countdown;
use glam::Vec3;
use physics::BoundingVolume;
use std::time::Duration;

/// Default time a hit target stays hidden.
pub const TARGET_RESPAWN: Duration = Duration::from_millis(15_000);

/// Index of a target in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

#[derive(Debug, Clone)]
pub struct Target {
    id: TargetId,
    position: Vec3,
    volume: BoundingVolume,
    /// Running only while the target is hidden.
    respawn: Option<Countdown>,
}

impl Target {
    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn volume(&self) -> &BoundingVolume {
        &self.volume
    }

    pub fn is_visible(&self) -> bool {
        self.respawn.is_none()
    }

    /// Time until a hidden target reappears.
    pub fn respawn_remaining(&self) -> Option<Duration> {
        self.respawn.map(|c| c.remaining())
    }
}

/// Fixed set of targets. Targets are never removed, only hidden and shown.
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    respawn_delay: Duration,
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new(TARGET_RESPAWN)
    }
}

impl TargetRegistry {
    pub fn new(respawn_delay: Duration) -> Self {
        Self {
            targets: Vec::new(),
            respawn_delay,
        }
    }

    /// Place a visible target.
    pub fn add(&mut self, position: Vec3, volume: BoundingVolume) -> TargetId {
        let id = TargetId(self.targets.len());
        self.targets.push(Target {
            id,
            position,
            volume,
            respawn: None,
        });
        id
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    /// Visible targets in registry order.
    pub fn visible(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.is_visible())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// First visible target (lowest id) whose volume overlaps the given one.
    pub fn first_hit(&self, position: Vec3, volume: &BoundingVolume) -> Option<TargetId> {
        self.visible()
            .find(|t| physics::intersects(position, volume, t.position, &t.volume))
            .map(|t| t.id)
    }

    /// Hide a target and start its respawn countdown. Hidden targets are left alone.
    pub fn mark_hit(&mut self, id: TargetId) -> bool {
        let delay = self.respawn_delay;
        match self.targets.get_mut(id.0) {
            Some(target) if target.is_visible() => {
                target.respawn = Some(Countdown::new(delay));
                log::info!("Target {} hit", id.0);
                true
            }
            _ => false,
        }
    }

    /// Advance respawn countdowns. Returns targets that became visible.
    pub fn tick(&mut self, dt: Duration) -> Vec<TargetId> {
        let mut respawned = Vec::new();
        for target in &mut self.targets {
            if let Some(countdown) = target.respawn.as_mut() {
                if countdown.tick(dt) {
                    target.respawn = None;
                    log::debug!("Target {} respawned", target.id.0);
                    respawned.push(target.id);
                }
            }
        }
        respawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TargetRegistry {
        let mut reg = TargetRegistry::default();
        reg.add(Vec3::new(0.0, 1.0, 0.0), BoundingVolume::cuboid(Vec3::ONE));
        reg.add(Vec3::new(1.0, 1.0, 0.0), BoundingVolume::cuboid(Vec3::ONE));
        reg
    }

    #[test]
    fn targets_start_visible() {
        let reg = registry();
        assert_eq!(reg.visible().count(), 2);
    }

    #[test]
    fn overlapping_targets_resolve_to_lowest_id() {
        let reg = registry();
        let shell = BoundingVolume::sphere(0.1);
        assert_eq!(reg.first_hit(Vec3::new(0.5, 1.0, 0.0), &shell), Some(TargetId(0)));
    }

    #[test]
    fn hidden_target_is_skipped() {
        let mut reg = registry();
        let shell = BoundingVolume::sphere(0.1);
        assert!(reg.mark_hit(TargetId(0)));
        assert_eq!(reg.first_hit(Vec3::new(0.5, 1.0, 0.0), &shell), Some(TargetId(1)));
        assert!(reg.mark_hit(TargetId(1)));
        assert_eq!(reg.first_hit(Vec3::new(0.5, 1.0, 0.0), &shell), None);
    }

    #[test]
    fn respawn_takes_exactly_the_delay() {
        let mut reg = registry();
        reg.mark_hit(TargetId(1));
        for _ in 0..14 {
            assert!(reg.tick(Duration::from_millis(1000)).is_empty());
        }
        assert!(reg.tick(Duration::from_millis(999)).is_empty());
        assert!(!reg.get(TargetId(1)).unwrap().is_visible());
        assert_eq!(reg.tick(Duration::from_millis(1)), vec![TargetId(1)]);
        assert!(reg.get(TargetId(1)).unwrap().is_visible());
    }

    #[test]
    fn hitting_hidden_target_does_not_restart_timer() {
        let mut reg = registry();
        reg.mark_hit(TargetId(0));
        reg.tick(Duration::from_millis(10_000));
        assert!(!reg.mark_hit(TargetId(0)));
        assert_eq!(
            reg.get(TargetId(0)).unwrap().respawn_remaining(),
            Some(Duration::from_millis(5_000))
        );
    }
}
