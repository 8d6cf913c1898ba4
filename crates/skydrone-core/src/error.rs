//! Error types shared by the simulation crates.

use thiserror::Error;

/// Coordinate transform errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Latitude outside the open Mercator domain.
    #[error("latitude {latitude} is outside the Mercator domain")]
    OutOfDomain { latitude: f64 },

    /// A coordinate that is not a finite number.
    #[error("{name} must be finite, got {value}")]
    InvalidCoordinate { name: &'static str, value: f64 },
}

/// Simulation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A caller passed a value outside the operation's contract.
    #[error("invalid argument {name}: {value}")]
    InvalidArgument { name: &'static str, value: f64 },

    #[error(transparent)]
    Geo(#[from] GeoError),
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
