//! Flat ground plane at y = 0 with a bounded playable rectangle.

use engine_core::Vec3;

/// Horizontal ground plane. Impacts are detected on the infinite plane;
/// `half_extents` bound where things may be placed on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    /// Height of the plane.
    pub height: f32,
    /// Centre of the playable rectangle (XZ; Y ignored).
    pub center: Vec3,
    /// Half width along X and half depth along Z of the playable rectangle.
    pub half_x: f32,
    pub half_z: f32,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self::new(175.0, 400.0)
    }
}

impl GroundPlane {
    /// Plane of `width` (X) by `depth` (Z) centred on the origin.
    pub fn new(width: f32, depth: f32) -> Self {
        Self {
            height: 0.0,
            center: Vec3::ZERO,
            half_x: width.abs() * 0.5,
            half_z: depth.abs() * 0.5,
        }
    }

    /// True once a point has reached or passed below the surface.
    pub fn is_impact(&self, point: Vec3) -> bool {
        point.y <= self.height
    }

    /// Clamp a position's X/Z into the playable rectangle. Y is left untouched.
    pub fn clamp_xz(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.center.x - self.half_x, self.center.x + self.half_x),
            point.y,
            point.z.clamp(self.center.z - self.half_z, self.center.z + self.half_z),
        )
    }

    pub fn contains_xz(&self, point: Vec3) -> bool {
        (point.x - self.center.x).abs() <= self.half_x && (point.z - self.center.z).abs() <= self.half_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_at_and_below_surface() {
        let ground = GroundPlane::default();
        assert!(ground.is_impact(Vec3::new(0.0, 0.0, 0.0)));
        assert!(ground.is_impact(Vec3::new(0.0, -0.3, 0.0)));
        assert!(!ground.is_impact(Vec3::new(0.0, 0.01, 0.0)));
    }

    #[test]
    fn clamp_keeps_point_on_plane() {
        let ground = GroundPlane::new(175.0, 400.0);
        let p = ground.clamp_xz(Vec3::new(100.0, 1.0, -250.0));
        assert_eq!(p, Vec3::new(87.5, 1.0, -200.0));
        assert!(ground.contains_xz(p));
    }
}
