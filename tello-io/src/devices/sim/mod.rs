//! Simulated Tello for hardware-free mission runs
//!
//! Mimics the drone's command responses closely enough that mission code
//! cannot tell it from the real vehicle:
//!
//! - motion before `connect()` fails with `NotConnected`
//! - motion before `takeoff()` fails with `Grounded`
//! - arguments outside the SDK ranges fail with `OutOfRange`
//!
//! Behind the responses it integrates a ground-truth pose, optionally with
//! Gaussian drift so that dead reckoning can be compared against "reality".
//!
//! # Test hooks
//!
//! [`SimulatedTello`] is a cheap cloneable handle onto shared state. A test
//! keeps one clone while the controller owns another, then inspects
//! [`history`](SimulatedTello::history) or queues failures with
//! [`fail_next`](SimulatedTello::fail_next).

mod noise;

use crate::config::{CommandLimits, DeviceConfig, SimulatorConfig};
use crate::core::actuator::MotionActuator;
use crate::core::types::{MoveDirection, Primitive, RotateDirection};
use crate::error::{Error, Result};
use noise::NoiseGenerator;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Height reached by `takeoff` (cm)
const TAKEOFF_HEIGHT_CM: f32 = 80.0;

/// Ground-truth pose of the simulated vehicle
///
/// Same frame as dead reckoning: origin at the connect point, x along the
/// initial heading, y to its left, yaw counter-clockwise positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimPose {
    /// Forward offset (cm)
    pub x: f32,
    /// Leftward offset (cm)
    pub y: f32,
    /// Height above the takeoff point (cm)
    pub z: f32,
    /// Yaw in degrees, [0, 360)
    pub yaw: f32,
}

struct SimState {
    config: SimulatorConfig,
    limits: CommandLimits,
    connected: bool,
    airborne: bool,
    battery: f32,
    pose: SimPose,
    history: Vec<Primitive>,
    pending_failures: VecDeque<Error>,
    noise: NoiseGenerator,
}

/// Simulated drone
#[derive(Clone)]
pub struct SimulatedTello {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedTello {
    /// Create a disconnected, landed simulator
    pub fn new(config: &DeviceConfig) -> Self {
        let sim = &config.simulator;
        tracing::debug!(
            "SimulatedTello: battery={:.0}%, distance_noise={:.3}, rotation_noise={:.2}°, seed={}",
            sim.battery_percent,
            sim.distance_noise,
            sim.rotation_noise_deg,
            sim.random_seed
        );

        Self {
            state: Arc::new(Mutex::new(SimState {
                config: sim.clone(),
                limits: config.limits,
                connected: false,
                airborne: false,
                battery: sim.battery_percent,
                pose: SimPose::default(),
                history: Vec::new(),
                pending_failures: VecDeque::new(),
                noise: NoiseGenerator::new(sim.random_seed),
            })),
        }
    }

    /// Make the next command fail with `error` and have no effect
    ///
    /// Queued failures are consumed one per command, in order.
    pub fn fail_next(&self, error: Error) {
        self.state.lock().pending_failures.push_back(error);
    }

    /// Every move and rotation primitive accepted so far, in order
    pub fn history(&self) -> Vec<Primitive> {
        self.state.lock().history.clone()
    }

    /// Ground-truth pose
    pub fn pose(&self) -> SimPose {
        self.state.lock().pose
    }

    /// Forget recorded primitives
    pub fn clear_history(&self) {
        self.state.lock().history.clear();
    }
}

impl SimState {
    fn take_failure(&mut self) -> Result<()> {
        match self.pending_failures.pop_front() {
            Some(error) => {
                tracing::warn!("SimulatedTello: injected failure: {}", error);
                Err(error)
            }
            None => Ok(()),
        }
    }

    fn require_connected(&mut self) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.take_failure()
    }

    fn require_airborne(&mut self) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        if !self.airborne {
            return Err(Error::Grounded);
        }
        self.take_failure()
    }

    fn drain(&mut self) {
        self.battery = (self.battery - self.config.battery_drain_per_command).max(0.0);
    }

    fn translate(&mut self, direction: MoveDirection, distance_cm: u32) {
        let noise = self.noise.gaussian(self.config.distance_noise);
        let distance = distance_cm as f32 * (1.0 + noise);

        let offset = match direction {
            MoveDirection::Forward => 0.0,
            MoveDirection::Left => 90.0,
            MoveDirection::Back => 180.0,
            MoveDirection::Right => -90.0,
            MoveDirection::Up => {
                self.pose.z += distance;
                return;
            }
            MoveDirection::Down => {
                self.pose.z = (self.pose.z - distance).max(0.0);
                return;
            }
        };

        let (sin, cos) = (self.pose.yaw + offset).to_radians().sin_cos();
        self.pose.x += distance * cos;
        self.pose.y += distance * sin;
    }

    fn turn(&mut self, direction: RotateDirection, degrees: u32) {
        let noise = self.noise.gaussian(self.config.rotation_noise_deg);
        let delta = direction.sign() as f32 * (degrees as f32 + noise);
        self.pose.yaw = (self.pose.yaw + delta).rem_euclid(360.0);
    }
}

impl MotionActuator for SimulatedTello {
    fn connect(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.take_failure()?;
        state.connected = true;
        state.pose = SimPose::default();
        tracing::info!("SimulatedTello: connected");
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        if state.airborne {
            tracing::warn!("SimulatedTello: disconnecting while airborne, landing first");
            state.airborne = false;
            state.pose.z = 0.0;
        }
        state.connected = false;
        tracing::info!("SimulatedTello: connection closed");
        Ok(())
    }

    fn takeoff(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.require_connected()?;
        state.airborne = true;
        state.pose.z = TAKEOFF_HEIGHT_CM;
        state.drain();
        tracing::debug!("SimulatedTello: takeoff");
        Ok(())
    }

    fn land(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.require_airborne()?;
        state.airborne = false;
        state.pose.z = 0.0;
        state.drain();
        tracing::debug!("SimulatedTello: land");
        Ok(())
    }

    fn move_by(&mut self, direction: MoveDirection, distance_cm: u32) -> Result<()> {
        let mut state = self.state.lock();
        state.require_airborne()?;
        state
            .limits
            .check_move(direction.sdk_command(), distance_cm)?;

        state.translate(direction, distance_cm);
        state.history.push(Primitive::Move {
            direction,
            distance_cm,
        });
        state.drain();
        tracing::debug!(
            "SimulatedTello: {} {}cm -> truth ({:.1}, {:.1}, {:.1})",
            direction.sdk_command(),
            distance_cm,
            state.pose.x,
            state.pose.y,
            state.pose.z
        );
        Ok(())
    }

    fn rotate(&mut self, direction: RotateDirection, degrees: u32) -> Result<()> {
        let mut state = self.state.lock();
        state.require_airborne()?;
        state
            .limits
            .check_rotation(direction.sdk_command(), degrees)?;

        state.turn(direction, degrees);
        state.history.push(Primitive::Rotate { direction, degrees });
        state.drain();
        tracing::debug!(
            "SimulatedTello: {} {}° -> truth yaw {:.1}°",
            direction.sdk_command(),
            degrees,
            state.pose.yaw
        );
        Ok(())
    }

    fn battery(&mut self) -> Result<u8> {
        let mut state = self.state.lock();
        state.require_connected()?;
        Ok(state.battery.round().clamp(0.0, 100.0) as u8)
    }

    fn height(&mut self) -> Result<u32> {
        let mut state = self.state.lock();
        state.require_connected()?;
        Ok(state.pose.z.round().max(0.0) as u32)
    }

    fn limits(&self) -> CommandLimits {
        self.state.lock().limits
    }

    fn is_connected(&self) -> bool {
        self.state.lock().connected
    }

    fn is_airborne(&self) -> bool {
        self.state.lock().airborne
    }
}
