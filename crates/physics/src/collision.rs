//! Bounding volumes and overlap tests.

use engine_core::Vec3;
use rapier3d::na::{Isometry3, Vector3};
use rapier3d::parry::query;
use rapier3d::parry::shape::{Ball, Cuboid, Shape};

/// Axis-aligned collision volume centred on an object's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    /// Sphere with the given radius.
    Sphere { radius: f32 },
    /// Box with the given half extents.
    Box { half_extents: Vec3 },
}

impl BoundingVolume {
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box { half_extents }
    }

    fn with_shape<R>(&self, f: impl FnOnce(&dyn Shape) -> R) -> R {
        match *self {
            Self::Sphere { radius } => f(&Ball::new(radius)),
            Self::Box { half_extents: h } => f(&Cuboid::new(Vector3::new(h.x, h.y, h.z))),
        }
    }
}

fn isometry(at: Vec3) -> Isometry3<f32> {
    Isometry3::translation(at.x, at.y, at.z)
}

/// Check whether two volumes overlap (touching counts as overlapping).
pub fn intersects(a_pos: Vec3, a: &BoundingVolume, b_pos: Vec3, b: &BoundingVolume) -> bool {
    let (iso_a, iso_b) = (isometry(a_pos), isometry(b_pos));
    a.with_shape(|shape_a| {
        b.with_shape(|shape_b| match query::intersection_test(&iso_a, shape_a, &iso_b, shape_b) {
            Ok(hit) => hit,
            Err(_) => {
                log::warn!("Unsupported intersection pair {:?} / {:?}", a, b);
                false
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_inside_box_intersects() {
        let shell = BoundingVolume::sphere(0.1);
        let target = BoundingVolume::cuboid(Vec3::splat(1.0));
        assert!(intersects(
            Vec3::new(0.5, 0.5, 0.5),
            &shell,
            Vec3::ZERO,
            &target
        ));
    }

    #[test]
    fn sphere_near_box_face_intersects() {
        let shell = BoundingVolume::sphere(0.1);
        let target = BoundingVolume::cuboid(Vec3::splat(1.0));
        assert!(intersects(Vec3::new(1.05, 0.0, 0.0), &shell, Vec3::ZERO, &target));
    }

    #[test]
    fn distant_sphere_misses_box() {
        let shell = BoundingVolume::sphere(0.1);
        let target = BoundingVolume::cuboid(Vec3::splat(1.0));
        assert!(!intersects(Vec3::new(1.5, 0.0, 0.0), &shell, Vec3::ZERO, &target));
    }

    #[test]
    fn spheres_overlap_by_radius_sum() {
        let a = BoundingVolume::sphere(0.5);
        let b = BoundingVolume::sphere(0.5);
        assert!(intersects(Vec3::ZERO, &a, Vec3::new(0.9, 0.0, 0.0), &b));
        assert!(!intersects(Vec3::ZERO, &a, Vec3::new(1.1, 0.0, 0.0), &b));
    }
}
