//! Configuration loading for TelloNav

use crate::error::{NavError, Result};
use crate::navigator::FlightStrategy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tello_io::DeviceConfig;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NavConfig {
    /// Vehicle selection (`type = "tello"` or `"simulator"`)
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub flight: FlightConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub mission: MissionConfig,
}

/// Navigation settings
#[derive(Clone, Debug, Deserialize)]
pub struct FlightConfig {
    /// Longest single translation sent to the vehicle (default: 500, the SDK maximum)
    #[serde(default = "default_max_leg")]
    pub max_leg_cm: u32,

    /// Strategy for `fly_to` steps that do not name one (default: direct)
    #[serde(default)]
    pub default_strategy: FlightStrategy,

    /// Farthest horizontal distance from the takeoff point a move may end at
    /// (default: unlimited)
    #[serde(default)]
    pub tether_cm: Option<u32>,
}

/// Session log settings
#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (trace, debug, info, warn, error); `RUST_LOG` wins if set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Optional log file, appended to on every run
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Mission selection and altitude band
#[derive(Clone, Debug, Deserialize)]
pub struct MissionConfig {
    /// Mission file to fly when none is given on the command line
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Altitude for `go_to_floor` steps (default: 100)
    #[serde(default = "default_floor")]
    pub floor_cm: u32,

    /// Altitude for `go_to_ceiling` steps (default: 300)
    #[serde(default = "default_ceiling")]
    pub ceiling_cm: u32,
}

// Default value functions
fn default_max_leg() -> u32 {
    500
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_floor() -> u32 {
    100
}
fn default_ceiling() -> u32 {
    300
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            max_leg_cm: default_max_leg(),
            default_strategy: FlightStrategy::default(),
            tether_cm: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            file: None,
            floor_cm: default_floor(),
            ceiling_cm: default_ceiling(),
        }
    }
}

impl MissionConfig {
    /// Check that the floor is not above the ceiling
    pub fn check_band(floor_cm: u32, ceiling_cm: u32) -> Result<()> {
        if floor_cm > ceiling_cm {
            return Err(NavError::Config(format!(
                "Mission floor {}cm is above ceiling {}cm",
                floor_cm, ceiling_cm
            )));
        }
        Ok(())
    }
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NavError::Config(format!("Failed to read config file: {}", e)))?;
        let config: NavConfig = toml::from_str(&content)?;
        MissionConfig::check_band(config.mission.floor_cm, config.mission.ceiling_cm)?;
        Ok(config)
    }
}
