//! Tello SDK driver
//!
//! Speaks the Tello SDK 2.0 text protocol: each command is an ASCII line
//! sent to the drone's command port, answered by `ok` or `error ...`.
//!
//! | Operation | SDK command |
//! |-----------|-------------|
//! | connect | `command` (enter SDK mode) |
//! | takeoff / land | `takeoff` / `land` |
//! | move | `forward N`, `back N`, `left N`, `right N`, `up N`, `down N` |
//! | rotate | `cw N`, `ccw N` |
//! | battery | `battery?` (reply is a bare number) |
//! | height | `height?` (reply in decimeters, e.g. `8dm`) |
//!
//! Every call blocks until the reply arrives, which for motion commands is
//! after the drone has finished moving.

use crate::config::{CommandLimits, DeviceConfig};
use crate::core::actuator::MotionActuator;
use crate::core::types::{MoveDirection, Primitive, RotateDirection};
use crate::error::{Error, Result};
use crate::transport::{Transport, UdpTransport};

/// Real Tello drone
pub struct TelloDriver<T: Transport = UdpTransport> {
    transport: T,
    limits: CommandLimits,
    connected: bool,
    airborne: bool,
}

impl TelloDriver<UdpTransport> {
    /// Open the UDP command socket described by `config.tello`
    pub fn open(config: &DeviceConfig) -> Result<Self> {
        let transport = UdpTransport::open(
            &config.tello.bind_address,
            &config.tello.address,
            config.tello.response_timeout_ms,
        )?;
        Ok(Self::with_transport(transport, config.limits))
    }
}

impl<T: Transport> TelloDriver<T> {
    /// Create a driver over an arbitrary transport
    pub fn with_transport(transport: T, limits: CommandLimits) -> Self {
        Self {
            transport,
            limits,
            connected: false,
            airborne: false,
        }
    }

    /// Send a command that is answered by `ok`
    fn command(&mut self, command: &str) -> Result<()> {
        let reply = self.transport.request(command)?;
        if reply.eq_ignore_ascii_case("ok") {
            tracing::debug!("Tello: '{}' -> ok", command);
            Ok(())
        } else if reply.to_ascii_lowercase().starts_with("error") {
            tracing::warn!("Tello: '{}' rejected: {}", command, reply);
            Err(Error::Rejected(reply))
        } else {
            Err(Error::InvalidResponse(format!("'{}' -> '{}'", command, reply)))
        }
    }

    fn require_connected(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    fn require_airborne(&self) -> Result<()> {
        self.require_connected()?;
        if self.airborne {
            Ok(())
        } else {
            Err(Error::Grounded)
        }
    }
}

impl<T: Transport> MotionActuator for TelloDriver<T> {
    fn connect(&mut self) -> Result<()> {
        self.command("command")?;
        self.connected = true;
        tracing::info!("Tello: SDK mode entered");
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        if !self.connected {
            return Ok(());
        }
        if self.airborne {
            tracing::warn!("Tello: disconnecting while airborne, landing first");
            self.land()?;
        }
        self.connected = false;
        tracing::info!("Tello: connection closed");
        Ok(())
    }

    fn takeoff(&mut self) -> Result<()> {
        self.require_connected()?;
        self.command("takeoff")?;
        self.airborne = true;
        Ok(())
    }

    fn land(&mut self) -> Result<()> {
        self.require_airborne()?;
        self.command("land")?;
        self.airborne = false;
        Ok(())
    }

    fn move_by(&mut self, direction: MoveDirection, distance_cm: u32) -> Result<()> {
        self.require_airborne()?;
        self.limits.check_move(direction.sdk_command(), distance_cm)?;
        self.command(
            &Primitive::Move {
                direction,
                distance_cm,
            }
            .sdk_command(),
        )
    }

    fn rotate(&mut self, direction: RotateDirection, degrees: u32) -> Result<()> {
        self.require_airborne()?;
        self.limits.check_rotation(direction.sdk_command(), degrees)?;
        self.command(&Primitive::Rotate { direction, degrees }.sdk_command())
    }

    fn battery(&mut self) -> Result<u8> {
        self.require_connected()?;
        let reply = self.transport.request("battery?")?;
        reply
            .parse::<u8>()
            .map_err(|_| Error::InvalidResponse(format!("battery? -> '{}'", reply)))
    }

    fn height(&mut self) -> Result<u32> {
        self.require_connected()?;
        let reply = self.transport.request("height?")?;
        parse_height_cm(&reply)
            .ok_or_else(|| Error::InvalidResponse(format!("height? -> '{}'", reply)))
    }

    fn limits(&self) -> CommandLimits {
        self.limits
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_airborne(&self) -> bool {
        self.airborne
    }
}

/// Parse a `height?` reply into centimeters
///
/// Firmware answers in decimeters (`8dm`); a bare number is taken as cm.
fn parse_height_cm(reply: &str) -> Option<u32> {
    let reply = reply.trim();
    if let Some(dm) = reply.strip_suffix("dm") {
        dm.trim().parse::<u32>().ok().map(|dm| dm * 10)
    } else {
        reply.strip_suffix("cm").unwrap_or(reply).trim().parse().ok()
    }
}
