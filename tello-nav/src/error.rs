//! Error types for TelloNav

use tello_io::Primitive;
use thiserror::Error;

/// TelloNav error type
#[derive(Error, Debug)]
pub enum NavError {
    /// The vehicle refused or failed a primitive; nothing after it was sent
    #[error("Actuator error: {0}")]
    Actuator(#[from] tello_io::Error),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Geometry that cannot be turned into primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// Bearing requested between two coincident points
    #[error("Bearing undefined: position coincides with the reference point")]
    UndefinedAngle,

    /// Non-finite coordinate or angle, or a distance no command can carry
    #[error("Invalid target ({x}, {y}): coordinates must be finite and in range")]
    InvalidTarget { x: f64, y: f64 },

    /// A planned primitive lies outside what the vehicle accepts
    #[error("{primitive} is outside the vehicle range [{min}, {max}]")]
    OutOfLimits {
        primitive: Primitive,
        min: u32,
        max: u32,
    },

    /// Target lies farther from the takeoff point than the tether allows
    #[error("Target is {distance_cm:.0}cm from origin, beyond the {tether_cm}cm tether")]
    BeyondTether { distance_cm: f64, tether_cm: u32 },
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
