//! Rejection reasons for player commands and configuration errors.

use thiserror::Error;

/// Why a command was refused. Rejections are ordinary outcomes, not faults:
/// the command is a no-op and the presentation layer decides what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("reloading")]
    Cooldown,
    #[error("barrel worn")]
    Worn,
    #[error("repair already in progress")]
    AlreadyRepairing,
    #[error("barrel needs no repair")]
    NothingToRepair,
}

/// Failure to load or validate a [`crate::SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
