//! Howitzer ballistics core.
//!
//! Models shot timing, barrel wear and repair, powder-dependent muzzle speed,
//! wind-affected shell flight and impacts against targets and the ground. A
//! presentation layer drives a [`Session`] with plain commands and reads
//! plain data back each frame.

pub mod barrel;
pub mod config;
pub mod effects;
pub mod emplacement;
pub mod error;
pub mod events;
pub mod firing;
pub mod powder;
pub mod projectile;
pub mod session;
pub mod target;
pub mod wind;

pub use barrel::{BarrelCondition, BarrelState};
pub use config::SimConfig;
pub use effects::{Crater, Effects, Explosion, Recoil};
pub use emplacement::Emplacement;
pub use error::{ConfigError, Rejection};
pub use events::{EventQueue, SimEvent};
pub use firing::{FireResult, FiringController, MuzzleGeometry};
pub use powder::{PowderKind, PowderProfile, PowderSelection};
pub use projectile::{Projectile, ProjectileId, ProjectileSimulation};
pub use session::{FiringStatus, Session, SimulationState, Snapshot};
pub use target::{Target, TargetId, TargetRegistry};
pub use wind::Wind;
