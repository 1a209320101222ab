//! TelloIO - Motion actuator abstraction for the DJI Tello
//!
//! This library provides the single capability the navigation layer needs
//! from a vehicle: execute one move or rotation primitive and report success
//! or failure. Two interchangeable variants implement it:
//!
//! - [`devices::tello::TelloDriver`]: the real drone, driven through the
//!   Tello SDK text commands over UDP
//! - [`devices::sim::SimulatedTello`]: a software vehicle that mimics the
//!   drone's responses, used by tests and dry runs
//!
//! Pick one at runtime with [`devices::create_actuator`].

pub mod config;
pub mod core;
pub mod devices;
pub mod error;
pub mod transport;

// Re-export commonly used types
pub use config::DeviceConfig;
pub use core::actuator::MotionActuator;
pub use core::types::{MoveDirection, Primitive, RotateDirection};
pub use error::{Error, Result};
