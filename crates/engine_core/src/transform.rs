//! Transform component and utilities for spatial positioning.

use glam::{Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Map a point from local space into world space (scale, rotate, translate).
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (local * self.scale)
    }

    /// Map a direction from local space into world space. Translation is ignored.
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * (local * self.scale)
    }

    /// Rotate around the world Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
    }

    /// Rotate around the local Z axis.
    pub fn rotate_local_z(&mut self, angle: f32) {
        self.rotation *= Quat::from_rotation_z(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn transform_point_matches_matrix() {
        let mut t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        t.rotate_y(0.7);
        t.rotate_local_z(-0.3);
        let local = Vec3::new(2.5, 5.0, 1.55);
        let matrix = glam::Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position);
        assert!(approx(t.transform_point(local), matrix.transform_point3(local)));
    }

    #[test]
    fn transform_direction_ignores_translation() {
        let t = Transform::from_position(Vec3::new(10.0, 0.0, -4.0));
        assert!(approx(t.transform_direction(Vec3::X), Vec3::X));
    }

    #[test]
    fn yaw_quarter_turn_maps_x_to_negative_z() {
        let mut t = Transform::default();
        t.rotate_y(std::f32::consts::FRAC_PI_2);
        assert!(approx(t.transform_direction(Vec3::X), -Vec3::Z));
    }
}
