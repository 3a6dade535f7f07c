//! Howitzer placement on the ground plane, traverse and barrel elevation.

use engine_core::{Transform, Vec3};
use physics::GroundPlane;

/// Where the gun stands and where the barrel points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emplacement {
    position: Vec3,
    /// Traverse around world Y, degrees.
    yaw_deg: f32,
    /// Barrel elevation, degrees, kept within `[min_elevation, max_elevation]`.
    elevation_deg: f32,
    min_elevation: f32,
    max_elevation: f32,
    ground: GroundPlane,
}

impl Emplacement {
    pub fn new(position: Vec3, ground: GroundPlane, min_elevation: f32, max_elevation: f32) -> Self {
        Self {
            position: ground.clamp_xz(position),
            yaw_deg: 0.0,
            elevation_deg: min_elevation,
            min_elevation,
            max_elevation,
            ground,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_deg
    }

    pub fn elevation_degrees(&self) -> f32 {
        self.elevation_deg
    }

    /// Raise or lower the barrel by `delta` degrees. Returns the clamped elevation.
    pub fn adjust_elevation(&mut self, delta: f32) -> f32 {
        if delta.is_finite() {
            self.elevation_deg = (self.elevation_deg + delta).clamp(self.min_elevation, self.max_elevation);
        }
        self.elevation_deg
    }

    /// Slide the gun across the ground, staying within the plane bounds.
    pub fn move_by(&mut self, dx: f32, dz: f32) -> Vec3 {
        if dx.is_finite() && dz.is_finite() {
            self.position = self.ground.clamp_xz(self.position + Vec3::new(dx, 0.0, dz));
        }
        self.position
    }

    /// Traverse by `delta` degrees (positive turns counter-clockwise seen from above).
    pub fn rotate(&mut self, delta: f32) -> f32 {
        if delta.is_finite() {
            self.yaw_deg = (self.yaw_deg + delta).rem_euclid(360.0);
        }
        self.yaw_deg
    }

    /// World transform of the gun carriage.
    pub fn carriage_transform(&self) -> Transform {
        let mut carriage = Transform::from_position(self.position);
        carriage.rotate_y(self.yaw_deg.to_radians());
        carriage
    }

    /// World transform of the barrel: carriage traverse, then elevation about
    /// the barrel's local Z axis.
    pub fn muzzle_transform(&self) -> Transform {
        let mut barrel = self.carriage_transform();
        barrel.rotate_local_z(-self.elevation_deg.to_radians());
        barrel
    }
}
