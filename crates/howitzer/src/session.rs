//! One game session: the command and query surface for a presentation layer,
//! and the per-frame driver that advances every subsystem in a fixed order.

use engine_core::{FrameStep, FrameTimer};
use glam::Vec3;
use physics::GroundPlane;
use std::time::Duration;

use crate::barrel::BarrelCondition;
use crate::config::SimConfig;
use crate::effects::Effects;
use crate::emplacement::Emplacement;
use crate::events::{EventQueue, SimEvent};
use crate::firing::{FireResult, FiringController, MuzzleGeometry};
use crate::powder::{PowderKind, PowderSelection};
use crate::projectile::{ProjectileId, ProjectileSimulation};
use crate::target::{Target, TargetRegistry};
use crate::wind::Wind;
use crate::{ConfigError, Rejection};

/// Status line for the reload indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiringStatus {
    Ready,
    Reloading,
    BarrelWorn,
    Repairing,
}

/// Everything mutable in a session. Subsystems only see the parts they need.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub barrel: BarrelCondition,
    pub firing: FiringController,
    pub powder: PowderSelection,
    pub wind: Wind,
    pub emplacement: Emplacement,
    pub projectiles: ProjectileSimulation,
    pub targets: TargetRegistry,
    pub ground: GroundPlane,
    pub effects: Effects,
}

/// Plain-data view of a session for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub wear_percent: f32,
    pub reload_progress: f32,
    pub status: FiringStatus,
    pub repair_progress_percent: Option<f32>,
    pub powder: PowderKind,
    pub wind: Vec3,
    pub emplacement_position: Vec3,
    pub yaw_deg: f32,
    pub elevation_deg: f32,
    pub recoil_offset: Vec3,
    pub projectiles: Vec<Vec3>,
    /// Target centre and visibility, in registry order.
    pub targets: Vec<(Vec3, bool)>,
    pub volume: f32,
}

/// Single-player session. All mutation happens through `&mut self`, one call at a time.
#[derive(Debug)]
pub struct Session {
    state: SimulationState,
    events: EventQueue,
    timer: FrameTimer,
    volume: f32,
}

impl Default for Session {
    fn default() -> Self {
        Self::build(&SimConfig::default())
    }
}

impl Session {
    /// Validate the config and set up a fresh session.
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &SimConfig) -> Self {
        let ground = config.ground();
        let mut targets = TargetRegistry::new(config.target_respawn());
        for position in &config.targets {
            targets.add(Vec3::from_array(*position), config.target_volume());
        }

        let mut timer = FrameTimer::new(config.max_frame_dt);
        if let Some(hz) = config.fixed_step_hz {
            timer = timer.with_fixed_rate(hz, config.max_substeps);
        }

        let state = SimulationState {
            barrel: BarrelCondition::new(config.max_wear, config.min_power_factor, config.repair_duration())
                .with_wear(config.initial_wear),
            firing: FiringController::new(
                config.shot_cooldown(),
                MuzzleGeometry {
                    offset: Vec3::from_array(config.muzzle_offset),
                    direction: Vec3::from_array(config.muzzle_direction),
                },
            ),
            powder: config.powder_selection(),
            wind: Wind::calm(config.max_wind_strength),
            emplacement: Emplacement::new(
                Vec3::from_array(config.emplacement_position),
                ground,
                config.min_elevation_deg,
                config.max_elevation_deg,
            ),
            projectiles: ProjectileSimulation::new(config.gravity(), config.projectile_volume()),
            targets,
            ground,
            effects: Effects::new(
                config.recoil_duration(),
                config.recoil_distance,
                config.explosion_duration(),
                config.seed,
            )
            .with_crater_limit(config.max_craters),
        };
        log::info!(
            "Session ready: {} targets, powder {}, barrel wear {:.0}%",
            state.targets.len(),
            state.powder.active(),
            state.barrel.wear_percent()
        );

        Self {
            state,
            events: EventQueue::default(),
            timer,
            volume: 1.0,
        }
    }

    // ── Commands ───────────────────────────────────────────────────────────

    /// Fire the loaded charge at time `now`.
    pub fn fire(&mut self, now: Duration) -> Result<ProjectileId, Rejection> {
        let s = &mut self.state;
        let muzzle = s.emplacement.muzzle_transform();
        let powder = (s.powder.active(), s.powder.active_profile());
        match s.firing.fire(now, powder, &mut s.barrel, s.wind.vector(), &muzzle) {
            FireResult::Fired(projectile) => {
                self.events.push(SimEvent::ShotFired {
                    projectile: projectile.id,
                    position: projectile.position,
                    powder: projectile.powder,
                    muzzle_speed: projectile.velocity.length(),
                });
                s.projectiles.spawn(projectile);
                s.effects.on_shot();
                Ok(projectile.id)
            }
            FireResult::Rejected(reason) => Err(reason),
        }
    }

    /// Raise or lower the barrel by `delta` degrees; returns the new elevation.
    pub fn set_elevation(&mut self, delta: f32) -> f32 {
        self.state.emplacement.adjust_elevation(delta)
    }

    /// Start a barrel repair at time `now`.
    pub fn start_repair(&mut self, now: Duration) -> Result<(), Rejection> {
        self.state.barrel.start_repair(now)?;
        self.events.push(SimEvent::RepairStarted);
        Ok(())
    }

    pub fn set_powder(&mut self, kind: PowderKind) {
        self.state.powder.select(kind);
    }

    /// Select a charge by name ("black" or "nitro"); anything else is ignored.
    pub fn set_powder_by_name(&mut self, name: &str) -> bool {
        self.state.powder.select_by_name(name)
    }

    pub fn set_wind(&mut self, direction_deg: f32, strength: f32) -> Vec3 {
        self.state.wind.set(direction_deg, strength)
    }

    /// Set wind from a drag on the compass widget; see [`Wind::set_from_widget`].
    pub fn set_wind_from_widget(&mut self, dx: f32, dy: f32, radius: f32) -> Vec3 {
        self.state.wind.set_from_widget(dx, dy, radius)
    }

    pub fn move_emplacement(&mut self, dx: f32, dz: f32) -> Vec3 {
        self.state.emplacement.move_by(dx, dz)
    }

    pub fn rotate_emplacement(&mut self, delta_deg: f32) -> f32 {
        self.state.emplacement.rotate(delta_deg)
    }

    /// Master volume for the audio collaborator, clamped to [0, 1].
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        if volume.is_finite() {
            self.volume = volume.clamp(0.0, 1.0);
        }
        self.volume
    }

    // ── Frame driver ───────────────────────────────────────────────────────

    /// Advance the simulation to `now`.
    ///
    /// Order: target respawns, shell flight, barrel repair, effects. Timers
    /// use the real elapsed time; shell integration uses the clamped step.
    /// Repair progress is sampled against `now` directly.
    pub fn tick(&mut self, now: Duration) -> FrameStep {
        let step = self.timer.update(now);
        let s = &mut self.state;

        for target in s.targets.tick(step.wall_delta) {
            self.events.push(SimEvent::TargetRespawned { target });
        }

        let wind = s.wind.vector();
        for _ in 0..step.substeps {
            let events = s.projectiles.step(step.dt, wind, &mut s.targets, &s.ground);
            for event in &events {
                if let Some(position) = event.impact_position() {
                    s.effects.on_impact(position);
                }
            }
            self.events.extend(events);
        }

        let was_repairing = s.barrel.is_repairing();
        s.barrel.tick(now);
        if was_repairing && !s.barrel.is_repairing() {
            self.events.push(SimEvent::RepairCompleted);
        }

        s.effects.update(step.wall_delta);
        step
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn barrel_wear_percent(&self) -> f32 {
        self.state.barrel.wear_percent()
    }

    pub fn reload_progress(&self, now: Duration) -> f32 {
        self.state.firing.reload_progress(now)
    }

    pub fn is_barrel_worn(&self) -> bool {
        self.state.barrel.is_worn()
    }

    pub fn is_repairing(&self) -> bool {
        self.state.barrel.is_repairing()
    }

    /// Repair progress in percent while a repair runs.
    pub fn repair_progress_percent(&self) -> Option<f32> {
        self.state.barrel.repair_progress().map(|p| p * 100.0)
    }

    pub fn status(&self, now: Duration) -> FiringStatus {
        if self.is_repairing() {
            FiringStatus::Repairing
        } else if self.is_barrel_worn() {
            FiringStatus::BarrelWorn
        } else if self.reload_progress(now) < 1.0 {
            FiringStatus::Reloading
        } else {
            FiringStatus::Ready
        }
    }

    pub fn projectile_positions(&self) -> Vec<Vec3> {
        self.state.projectiles.positions()
    }

    /// Events since the previous drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    pub fn pending_events(&self) -> &[SimEvent] {
        self.events.pending()
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.state.targets.iter()
    }

    pub fn effects(&self) -> &Effects {
        &self.state.effects
    }

    pub fn wind(&self) -> &Wind {
        &self.state.wind
    }

    pub fn powder(&self) -> PowderKind {
        self.state.powder.active()
    }

    pub fn emplacement(&self) -> &Emplacement {
        &self.state.emplacement
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    pub fn snapshot(&self, now: Duration) -> Snapshot {
        let s = &self.state;
        Snapshot {
            wear_percent: self.barrel_wear_percent(),
            reload_progress: self.reload_progress(now),
            status: self.status(now),
            repair_progress_percent: self.repair_progress_percent(),
            powder: s.powder.active(),
            wind: s.wind.vector(),
            emplacement_position: s.emplacement.position(),
            yaw_deg: s.emplacement.yaw_degrees(),
            elevation_deg: s.emplacement.elevation_degrees(),
            recoil_offset: s.effects.recoil_offset(),
            projectiles: s.projectiles.positions(),
            targets: s.targets.iter().map(|t| (t.position(), t.is_visible())).collect(),
            volume: self.volume,
        }
    }
}
