//! Ballistic physics for the howitzer simulation: bounding volume overlap
//! (via Rapier's parry shapes), the ground plane, and trajectory integration.

pub mod collision;
pub mod ground;
pub mod integrator;

pub use collision::*;
pub use ground::*;
pub use integrator::*;

// Re-export Rapier for downstream crates
pub use rapier3d;
