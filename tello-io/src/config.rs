//! Configuration for TelloIO devices
//!
//! Loaded from the `[device]` table of a TOML file. Every field has a
//! default, so an empty table yields a simulator with stock Tello limits.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Device selection and per-variant settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Device type: `"tello"` (real drone) or `"simulator"`
    #[serde(rename = "type", default = "default_device_type")]
    pub device_type: String,

    /// SDK argument ranges shared by every variant
    #[serde(default)]
    pub limits: CommandLimits,

    /// Real drone connection settings
    #[serde(default)]
    pub tello: TelloConfig,

    /// Simulated drone settings
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// Argument ranges accepted by the Tello SDK
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CommandLimits {
    /// Shortest accepted move (cm)
    #[serde(default = "default_min_move")]
    pub min_move_cm: u32,

    /// Longest accepted move (cm)
    #[serde(default = "default_max_move")]
    pub max_move_cm: u32,

    /// Smallest accepted rotation (degrees)
    #[serde(default = "default_min_rotation")]
    pub min_rotation_deg: u32,

    /// Largest accepted rotation (degrees)
    #[serde(default = "default_max_rotation")]
    pub max_rotation_deg: u32,
}

/// UDP connection settings for the real drone
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelloConfig {
    /// Drone command address (SDK default `192.168.10.1:8889`)
    #[serde(default = "default_tello_address")]
    pub address: String,

    /// Local address the command socket binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// How long to wait for the reply to one command (ms)
    #[serde(default = "default_response_timeout")]
    pub response_timeout_ms: u64,
}

/// Simulated drone settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulatorConfig {
    /// Battery level at connect (percent)
    #[serde(default = "default_battery")]
    pub battery_percent: f32,

    /// Battery consumed by each accepted command (percent)
    #[serde(default = "default_battery_drain")]
    pub battery_drain_per_command: f32,

    /// Standard deviation of translation error, as a fraction of distance
    #[serde(default)]
    pub distance_noise: f32,

    /// Standard deviation of rotation error (degrees)
    #[serde(default)]
    pub rotation_noise_deg: f32,

    /// Random seed for noise (0 = random each run)
    #[serde(default)]
    pub random_seed: u64,
}

// Default value functions
fn default_device_type() -> String {
    "simulator".to_string()
}
fn default_min_move() -> u32 {
    20
}
fn default_max_move() -> u32 {
    500
}
fn default_min_rotation() -> u32 {
    1
}
fn default_max_rotation() -> u32 {
    360
}
fn default_tello_address() -> String {
    "192.168.10.1:8889".to_string()
}
fn default_bind_address() -> String {
    "0.0.0.0:8889".to_string()
}
fn default_response_timeout() -> u64 {
    7000
}
fn default_battery() -> f32 {
    100.0
}
fn default_battery_drain() -> f32 {
    0.1
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_type: default_device_type(),
            limits: CommandLimits::default(),
            tello: TelloConfig::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

impl Default for CommandLimits {
    fn default() -> Self {
        Self {
            min_move_cm: default_min_move(),
            max_move_cm: default_max_move(),
            min_rotation_deg: default_min_rotation(),
            max_rotation_deg: default_max_rotation(),
        }
    }
}

impl Default for TelloConfig {
    fn default() -> Self {
        Self {
            address: default_tello_address(),
            bind_address: default_bind_address(),
            response_timeout_ms: default_response_timeout(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            battery_percent: default_battery(),
            battery_drain_per_command: default_battery_drain(),
            distance_noise: 0.0,
            rotation_noise_deg: 0.0,
            random_seed: 0,
        }
    }
}

impl CommandLimits {
    /// Check a move distance against the SDK range
    pub fn check_move(&self, command: &'static str, distance_cm: u32) -> Result<()> {
        check_range(command, distance_cm, self.min_move_cm, self.max_move_cm)
    }

    /// Check a rotation against the SDK range
    pub fn check_rotation(&self, command: &'static str, degrees: u32) -> Result<()> {
        check_range(
            command,
            degrees,
            self.min_rotation_deg,
            self.max_rotation_deg,
        )
    }
}

fn check_range(command: &'static str, value: u32, min: u32, max: u32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            command,
            value,
            min,
            max,
        })
    }
}
