//! Simulation tuning. Loaded from howitzer.ron at startup.

use glam::Vec3;
use physics::{BoundingVolume, GroundPlane};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::powder::{PowderKind, PowderProfile, PowderSelection};
use crate::ConfigError;

/// File name looked up in the current directory.
pub const CONFIG_FILE: &str = "howitzer.ron";

/// Every tunable constant of a session. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Gravity acceleration (m/s²).
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],
    /// Minimum time between shots.
    #[serde(default = "default_cooldown_ms")]
    pub shot_cooldown_ms: u64,
    /// Time a barrel repair takes.
    #[serde(default = "default_repair_ms")]
    pub repair_duration_ms: u64,
    /// Time a hit target stays hidden.
    #[serde(default = "default_respawn_ms")]
    pub target_respawn_ms: u64,
    /// Wear at which the barrel locks out.
    #[serde(default = "default_max_wear")]
    pub max_wear: f32,
    /// Muzzle power fraction left at full wear.
    #[serde(default = "default_min_power_factor")]
    pub min_power_factor: f32,
    /// Barrel wear at session start.
    #[serde(default)]
    pub initial_wear: f32,
    #[serde(default = "default_black_powder")]
    pub black_powder: PowderProfile,
    #[serde(default = "default_nitro_powder")]
    pub nitro_powder: PowderProfile,
    /// Charge loaded at session start.
    #[serde(default)]
    pub default_powder: PowderKind,
    /// Wind magnitude at full normalized strength.
    #[serde(default = "default_max_wind")]
    pub max_wind_strength: f32,
    /// Shell bounding sphere radius.
    #[serde(default = "default_projectile_radius")]
    pub projectile_radius: f32,
    /// Spawn point of shells in barrel-local space.
    #[serde(default = "default_muzzle_offset")]
    pub muzzle_offset: [f32; 3],
    /// Bore direction in barrel-local space (need not be normalized).
    #[serde(default = "default_muzzle_direction")]
    pub muzzle_direction: [f32; 3],
    /// Howitzer position at session start.
    #[serde(default = "default_emplacement")]
    pub emplacement_position: [f32; 3],
    /// Ground plane width (X) and depth (Z), centred on the origin.
    #[serde(default = "default_ground_size")]
    pub ground_size: [f32; 2],
    /// Barrel elevation limits in degrees.
    #[serde(default)]
    pub min_elevation_deg: f32,
    #[serde(default = "default_max_elevation")]
    pub max_elevation_deg: f32,
    /// Half extents of every target's bounding box.
    #[serde(default = "default_target_half_extents")]
    pub target_half_extents: [f32; 3],
    /// Target centres, in registry order.
    #[serde(default = "default_targets")]
    pub targets: Vec<[f32; 3]>,
    /// Largest integration step allowed for one frame (seconds).
    #[serde(default = "default_max_frame_dt")]
    pub max_frame_dt: f32,
    /// Run projectile physics at a fixed rate instead of once per frame.
    #[serde(default)]
    pub fixed_step_hz: Option<f64>,
    #[serde(default = "default_max_substeps")]
    pub max_substeps: u32,
    #[serde(default = "default_recoil_ms")]
    pub recoil_duration_ms: u64,
    #[serde(default = "default_recoil_distance")]
    pub recoil_distance: f32,
    #[serde(default = "default_explosion_ms")]
    pub explosion_duration_ms: u64,
    /// Craters kept on the ground; the oldest is cleared past this.
    #[serde(default = "default_max_craters")]
    pub max_craters: usize,
    /// Seed for cosmetic randomness (crater sizes).
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_gravity() -> [f32; 3] {
    physics::GRAVITY.to_array()
}
fn default_cooldown_ms() -> u64 {
    1000
}
fn default_repair_ms() -> u64 {
    3000
}
fn default_respawn_ms() -> u64 {
    15_000
}
fn default_max_wear() -> f32 {
    crate::barrel::MAX_WEAR
}
fn default_min_power_factor() -> f32 {
    crate::barrel::MIN_POWER_FACTOR
}
fn default_black_powder() -> PowderProfile {
    PowderProfile::BLACK
}
fn default_nitro_powder() -> PowderProfile {
    PowderProfile::NITRO
}
fn default_max_wind() -> f32 {
    crate::wind::MAX_WIND_STRENGTH
}
fn default_projectile_radius() -> f32 {
    0.1
}
fn default_muzzle_offset() -> [f32; 3] {
    [2.5, 5.0, 1.55]
}
fn default_muzzle_direction() -> [f32; 3] {
    [1.0, 2.4, 0.0]
}
fn default_emplacement() -> [f32; 3] {
    [0.0, 0.0, 170.0]
}
fn default_ground_size() -> [f32; 2] {
    [175.0, 400.0]
}
fn default_max_elevation() -> f32 {
    45.0
}
fn default_target_half_extents() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_targets() -> Vec<[f32; 3]> {
    vec![
        [1.55, 1.0, -4.5],
        [-20.0, 1.0, 40.0],
        [25.0, 1.0, -60.0],
        [0.0, 1.0, -120.0],
    ]
}
fn default_max_frame_dt() -> f32 {
    0.1
}
fn default_max_substeps() -> u32 {
    8
}
fn default_recoil_ms() -> u64 {
    200
}
fn default_recoil_distance() -> f32 {
    0.6
}
fn default_explosion_ms() -> u64 {
    500
}
fn default_max_craters() -> usize {
    crate::effects::DEFAULT_MAX_CRATERS
}
fn default_seed() -> u64 {
    0x5EED
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            shot_cooldown_ms: default_cooldown_ms(),
            repair_duration_ms: default_repair_ms(),
            target_respawn_ms: default_respawn_ms(),
            max_wear: default_max_wear(),
            min_power_factor: default_min_power_factor(),
            initial_wear: 0.0,
            black_powder: default_black_powder(),
            nitro_powder: default_nitro_powder(),
            default_powder: PowderKind::default(),
            max_wind_strength: default_max_wind(),
            projectile_radius: default_projectile_radius(),
            muzzle_offset: default_muzzle_offset(),
            muzzle_direction: default_muzzle_direction(),
            emplacement_position: default_emplacement(),
            ground_size: default_ground_size(),
            min_elevation_deg: 0.0,
            max_elevation_deg: default_max_elevation(),
            target_half_extents: default_target_half_extents(),
            targets: default_targets(),
            max_frame_dt: default_max_frame_dt(),
            fixed_step_hz: None,
            max_substeps: default_max_substeps(),
            recoil_duration_ms: default_recoil_ms(),
            recoil_distance: default_recoil_distance(),
            explosion_duration_ms: default_explosion_ms(),
            max_craters: default_max_craters(),
            seed: default_seed(),
        }
    }
}

impl SimConfig {
    /// Load config from `howitzer.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => {
                log::info!("Loaded config from {:?}", path);
                c
            }
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_ron(&data)
    }

    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Save current config to `howitzer.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        match self.to_ron() {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg.to_string())) };
        if !(self.max_wear > 0.0) {
            return invalid("max_wear must be positive");
        }
        if !(0.0..=1.0).contains(&self.min_power_factor) {
            return invalid("min_power_factor must be within [0, 1]");
        }
        if !(0.0..=self.max_wear).contains(&self.initial_wear) {
            return invalid("initial_wear must be within [0, max_wear]");
        }
        for (name, p) in [("black_powder", &self.black_powder), ("nitro_powder", &self.nitro_powder)] {
            if !(p.speed > 0.0) || !(p.wear_per_shot >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} needs a positive speed and non-negative wear"
                )));
            }
        }
        if !(self.max_wind_strength >= 0.0) {
            return invalid("max_wind_strength must be non-negative");
        }
        if !(self.projectile_radius > 0.0) {
            return invalid("projectile_radius must be positive");
        }
        if Vec3::from_array(self.muzzle_direction).length_squared() <= f32::EPSILON {
            return invalid("muzzle_direction must be non-zero");
        }
        if self.min_elevation_deg > self.max_elevation_deg {
            return invalid("min_elevation_deg exceeds max_elevation_deg");
        }
        if self.target_half_extents.iter().any(|h| !(*h > 0.0)) {
            return invalid("target_half_extents must be positive");
        }
        if self.ground_size.iter().any(|s| !(*s > 0.0)) {
            return invalid("ground_size must be positive");
        }
        if !(self.max_frame_dt > 0.0) {
            return invalid("max_frame_dt must be positive");
        }
        if let Some(hz) = self.fixed_step_hz {
            if !(hz > 0.0) {
                return invalid("fixed_step_hz must be positive");
            }
            // The fixed step may not exceed the frame clamp.
            if 1.0 / hz > f64::from(self.max_frame_dt) + 1e-9 {
                return invalid("1 / fixed_step_hz must not exceed max_frame_dt");
            }
        }
        Ok(())
    }

    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    pub fn shot_cooldown(&self) -> Duration {
        Duration::from_millis(self.shot_cooldown_ms)
    }

    pub fn repair_duration(&self) -> Duration {
        Duration::from_millis(self.repair_duration_ms)
    }

    pub fn target_respawn(&self) -> Duration {
        Duration::from_millis(self.target_respawn_ms)
    }

    pub fn recoil_duration(&self) -> Duration {
        Duration::from_millis(self.recoil_duration_ms)
    }

    pub fn explosion_duration(&self) -> Duration {
        Duration::from_millis(self.explosion_duration_ms)
    }

    pub fn powder_selection(&self) -> PowderSelection {
        PowderSelection::new(self.black_powder, self.nitro_powder, self.default_powder)
    }

    pub fn ground(&self) -> GroundPlane {
        GroundPlane::new(self.ground_size[0], self.ground_size[1])
    }

    pub fn projectile_volume(&self) -> BoundingVolume {
        BoundingVolume::sphere(self.projectile_radius)
    }

    pub fn target_volume(&self) -> BoundingVolume {
        BoundingVolume::cuboid(Vec3::from_array(self.target_half_extents))
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_ron_struct_uses_defaults() {
        let config = SimConfig::from_ron("()").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_ron_overrides_fields() {
        let config = SimConfig::from_ron(
            "(shot_cooldown_ms: 250, default_powder: black, targets: [(0.0, 1.0, 0.0)])",
        )
        .unwrap();
        assert_eq!(config.shot_cooldown(), Duration::from_millis(250));
        assert_eq!(config.default_powder, PowderKind::Black);
        assert_eq!(config.targets.len(), 1);
        assert_eq!(config.repair_duration_ms, 3000);
    }

    #[test]
    fn pretty_output_parses_back() {
        let mut config = SimConfig::default();
        config.fixed_step_hz = Some(120.0);
        config.initial_wear = 96.0;
        let text = config.to_ron().unwrap();
        assert_eq!(SimConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases = [
            "(min_power_factor: 1.5)",
            "(initial_wear: 120.0)",
            "(muzzle_direction: (0.0, 0.0, 0.0))",
            "(max_elevation_deg: -5.0)",
            "(nitro_powder: (speed: 0.0, wear_per_shot: 5.0))",
            "(fixed_step_hz: Some(0.0))",
            "(fixed_step_hz: Some(1.0))",
            "(fixed_step_hz: Some(20.0), max_frame_dt: 0.04)",
        ];
        for case in cases {
            assert!(
                matches!(SimConfig::from_ron(case), Err(ConfigError::Invalid(_))),
                "{case} should be invalid"
            );
        }
    }

    #[test]
    fn fixed_step_within_frame_clamp_is_accepted() {
        for case in ["(fixed_step_hz: Some(10.0))", "(fixed_step_hz: Some(120.0))"] {
            assert!(SimConfig::from_ron(case).is_ok(), "{case} should be valid");
        }
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        assert!(matches!(SimConfig::from_ron("(max_wear: "), Err(ConfigError::Parse(_))));
    }
}
