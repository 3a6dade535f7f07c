//! Propellant charges: muzzle speed and barrel wear per shot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Propellant selectable before firing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowderKind {
    /// Slow, dirty charge. Low muzzle speed, heavy wear.
    Black,
    /// Smokeless charge. Fast and gentle on the barrel.
    #[default]
    Nitro,
}

impl PowderKind {
    pub const ALL: [PowderKind; 2] = [PowderKind::Black, PowderKind::Nitro];

    pub fn name(self) -> &'static str {
        match self {
            PowderKind::Black => "black",
            PowderKind::Nitro => "nitro",
        }
    }
}

impl fmt::Display for PowderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PowderKind {
    type Err = ();

    /// Only the exact lowercase names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "black" => Ok(PowderKind::Black),
            "nitro" => Ok(PowderKind::Nitro),
            _ => Err(()),
        }
    }
}

/// Ballistic parameters of one propellant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowderProfile {
    /// Muzzle speed of a new barrel (m/s).
    pub speed: f32,
    /// Wear added to the barrel by one shot.
    pub wear_per_shot: f32,
}

impl PowderProfile {
    pub const BLACK: PowderProfile = PowderProfile {
        speed: 30.0,
        wear_per_shot: 10.0,
    };
    pub const NITRO: PowderProfile = PowderProfile {
        speed: 50.0,
        wear_per_shot: 5.0,
    };
}

/// Profile table plus the currently loaded charge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowderSelection {
    black: PowderProfile,
    nitro: PowderProfile,
    active: PowderKind,
}

impl Default for PowderSelection {
    fn default() -> Self {
        Self::new(PowderProfile::BLACK, PowderProfile::NITRO, PowderKind::default())
    }
}

impl PowderSelection {
    pub fn new(black: PowderProfile, nitro: PowderProfile, active: PowderKind) -> Self {
        Self { black, nitro, active }
    }

    pub fn profile(&self, kind: PowderKind) -> PowderProfile {
        match kind {
            PowderKind::Black => self.black,
            PowderKind::Nitro => self.nitro,
        }
    }

    pub fn active(&self) -> PowderKind {
        self.active
    }

    pub fn active_profile(&self) -> PowderProfile {
        self.profile(self.active)
    }

    pub fn select(&mut self, kind: PowderKind) {
        if self.active != kind {
            log::info!("Powder set to {}", kind);
        }
        self.active = kind;
    }

    /// Select by name. Unknown names are ignored and return false.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match name.parse::<PowderKind>() {
            Ok(kind) => {
                self.select(kind);
                true
            }
            Err(()) => {
                log::debug!("Ignoring unknown powder {:?}", name);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nitro_is_the_default_charge() {
        let sel = PowderSelection::default();
        assert_eq!(sel.active(), PowderKind::Nitro);
        assert_eq!(sel.active_profile(), PowderProfile::NITRO);
    }

    #[test]
    fn selection_persists_until_changed() {
        let mut sel = PowderSelection::default();
        sel.select(PowderKind::Black);
        assert_eq!(sel.active_profile().speed, 30.0);
        assert_eq!(sel.active_profile().wear_per_shot, 10.0);
        assert_eq!(sel.active(), PowderKind::Black);
    }

    #[test]
    fn unknown_name_is_ignored() {
        let mut sel = PowderSelection::default();
        assert!(!sel.select_by_name("cordite"));
        assert!(!sel.select_by_name("BLACK"));
        assert_eq!(sel.active(), PowderKind::Nitro);
        assert!(sel.select_by_name("black"));
        assert_eq!(sel.active(), PowderKind::Black);
    }
}
