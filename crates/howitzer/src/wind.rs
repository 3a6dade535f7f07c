//! Horizontal wind acting on shells in flight.

use glam::Vec3;

/// Default upper bound on wind strength.
pub const MAX_WIND_STRENGTH: f32 = 10.0;

/// Ambient wind. The vector is always horizontal (`y == 0`) and its length never
/// exceeds `max_strength`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    vector: Vec3,
    max_strength: f32,
}

impl Default for Wind {
    fn default() -> Self {
        Self::calm(MAX_WIND_STRENGTH)
    }
}

impl Wind {
    /// No wind, with the given strength cap.
    pub fn calm(max_strength: f32) -> Self {
        Self {
            vector: Vec3::ZERO,
            max_strength: max_strength.max(0.0),
        }
    }

    /// Compass direction in degrees (0 = north, clockwise) and normalized strength
    /// in [0, 1] to a world-space vector. Out-of-range strength is clamped; NaN is calm.
    pub fn vector_for(direction_deg: f32, strength: f32, max_strength: f32) -> Vec3 {
        let strength = if strength.is_nan() { 0.0 } else { strength.clamp(0.0, 1.0) };
        let magnitude = strength * max_strength;
        let angle = direction_deg.to_radians();
        Vec3::new(-angle.sin() * magnitude, 0.0, angle.cos() * magnitude)
    }

    /// Set direction and normalized strength. Returns the new vector.
    pub fn set(&mut self, direction_deg: f32, strength: f32) -> Vec3 {
        self.vector = Self::vector_for(direction_deg, strength, self.max_strength);
        self.vector
    }

    /// Set wind from a drag on the compass widget: `dx` right and `dy` down from the
    /// widget centre, with `radius` the distance that means full strength.
    pub fn set_from_widget(&mut self, dx: f32, dy: f32, radius: f32) -> Vec3 {
        let (direction_deg, strength) = widget_to_polar(dx, dy, radius);
        self.set(direction_deg, strength)
    }

    pub fn vector(&self) -> Vec3 {
        self.vector
    }

    pub fn max_strength(&self) -> f32 {
        self.max_strength
    }

    /// Current magnitude in world units.
    pub fn strength(&self) -> f32 {
        self.vector.length()
    }

    /// Compass heading in [0, 360). Calm wind reports 0.
    pub fn direction_degrees(&self) -> f32 {
        if self.vector == Vec3::ZERO {
            return 0.0;
        }
        let deg = (-self.vector.x).atan2(self.vector.z).to_degrees();
        deg.rem_euclid(360.0)
    }
}

/// Widget offset to (compass degrees, normalized strength).
pub fn widget_to_polar(dx: f32, dy: f32, radius: f32) -> (f32, f32) {
    if radius <= 0.0 {
        return (0.0, 0.0);
    }
    let distance = (dx * dx + dy * dy).sqrt();
    let strength = (distance / radius).min(1.0);
    let angle = dx.atan2(-dy).to_degrees();
    (angle.rem_euclid(360.0), strength)
}
