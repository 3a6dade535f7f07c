//! Semi-implicit Euler integration for unpowered projectiles.

use engine_core::Vec3;

/// Standard gravity used for shells.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Advance one step: velocity picks up gravity and wind first, then the
/// position moves with the updated velocity.
pub fn integrate_step(position: &mut Vec3, velocity: &mut Vec3, gravity: Vec3, wind: Vec3, dt: f32) {
    *velocity += gravity * dt;
    *velocity += wind * dt;
    *position += *velocity * dt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_updates_before_position() {
        let mut pos = Vec3::ZERO;
        let mut vel = Vec3::ZERO;
        integrate_step(&mut pos, &mut vel, GRAVITY, Vec3::ZERO, 0.5);
        assert!((vel.y + 4.905).abs() < 1e-5);
        assert!((pos.y + 2.4525).abs() < 1e-5);
    }

    #[test]
    fn wind_accelerates_horizontally() {
        let mut pos = Vec3::ZERO;
        let mut vel = Vec3::new(10.0, 0.0, 0.0);
        integrate_step(&mut pos, &mut vel, Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), 1.0);
        assert_eq!(vel, Vec3::new(10.0, 0.0, 2.0));
        assert_eq!(pos, Vec3::new(10.0, 0.0, 2.0));
    }
}
