//! Device implementations
//!
//! - [`tello`]: the real drone over the SDK text protocol
//! - [`sim`]: a simulated drone with the same command semantics

pub mod sim;
pub mod tello;

use crate::config::DeviceConfig;
use crate::core::actuator::MotionActuator;
use crate::error::{Error, Result};
use sim::SimulatedTello;
use tello::TelloDriver;

/// Create a motion actuator based on configuration
///
/// The returned actuator is not yet connected.
pub fn create_actuator(config: &DeviceConfig) -> Result<Box<dyn MotionActuator>> {
    match config.device_type.as_str() {
        "tello" => {
            let driver = TelloDriver::open(config)?;
            Ok(Box::new(driver))
        }
        "simulator" | "sim" => Ok(Box::new(SimulatedTello::new(config))),
        _ => Err(Error::UnknownDevice(config.device_type.clone())),
    }
}
