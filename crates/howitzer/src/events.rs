//! Events produced by the simulation for the presentation layer.

use glam::Vec3;

use crate::projectile::ProjectileId;
use crate::target::TargetId;
use crate::PowderKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// A shell left the muzzle.
    ShotFired {
        projectile: ProjectileId,
        position: Vec3,
        powder: PowderKind,
        muzzle_speed: f32,
    },
    /// A shell struck a visible target. Terminal.
    TargetHit {
        target: TargetId,
        projectile: ProjectileId,
        position: Vec3,
    },
    /// A shell reached the ground. Terminal.
    GroundImpact {
        projectile: ProjectileId,
        position: Vec3,
    },
    /// A hidden target became visible again.
    TargetRespawned { target: TargetId },
    RepairStarted,
    RepairCompleted,
}

impl SimEvent {
    /// Ground impacts and target hits end a shell's flight.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SimEvent::TargetHit { .. } | SimEvent::GroundImpact { .. })
    }

    /// Where an explosion should be shown, for terminal events.
    pub fn impact_position(&self) -> Option<Vec3> {
        match *self {
            SimEvent::TargetHit { position, .. } | SimEvent::GroundImpact { position, .. } => Some(position),
            _ => None,
        }
    }
}

/// Events accumulated since the presentation layer last drained them.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<SimEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: SimEvent) {
        self.pending.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = SimEvent>) {
        self.pending.extend(events);
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[SimEvent] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
