//! Core abstractions for vehicle actuators.
//!
//! - [`actuator::MotionActuator`]: Trait to implement for a new vehicle
//! - [`types`]: Command primitives and directions

pub mod actuator;
pub mod types;
