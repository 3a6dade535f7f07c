//! Core engine types shared by the simulation crates.
//!
//! This crate provides the foundational types used across the workspace:
//! - Transform and spatial math
//! - Clocks and per-frame delta timing
//! - Phase timers and countdowns for multi-frame state transitions

pub mod time;
pub mod timer;
pub mod transform;

pub use time::*;
pub use timer::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec3};
