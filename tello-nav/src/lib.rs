//! TelloNav - Dead-reckoning navigation for scripted Tello flights
//!
//! Tracks where the drone *should* be from the commands it has confirmed,
//! without any external positioning:
//!
//! - [`heading`]: commanded yaw relative to the connect-time heading
//! - [`position`]: commanded (x, y) in the world frame fixed at connect time
//! - [`navigator`]: turns a world-frame target into move/rotate primitives
//! - [`controller`]: executes primitives on a [`tello_io::MotionActuator`]
//!   and keeps both trackers in step with what the vehicle confirmed
//! - [`mission`]: TOML mission files and the step runner
//!
//! The world frame has x along the initial heading and y to its left;
//! headings are degrees counter-clockwise in [0, 360).

pub mod config;
pub mod controller;
pub mod error;
pub mod heading;
pub mod mission;
pub mod navigator;
pub mod position;
pub mod telemetry;
pub mod utils;

pub use config::{FlightConfig, LoggingConfig, MissionConfig, NavConfig};
pub use controller::FlightController;
pub use error::{NavError, NavigationError, Result};
pub use heading::Heading;
pub use mission::{AltitudeBand, Mission, MissionStep, run_mission};
pub use navigator::FlightStrategy;
pub use position::Position;
pub use telemetry::SessionLog;
