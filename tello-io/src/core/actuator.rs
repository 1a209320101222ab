//! MotionActuator trait definition

use crate::config::CommandLimits;
use crate::core::types::{MoveDirection, Primitive, RotateDirection};
use crate::error::Result;

/// Vehicle capability consumed by the navigation layer
///
/// Every call blocks until the vehicle confirms completion or reports a
/// failure. Implementations enforce their own preconditions: motion commands
/// fail with [`Error::NotConnected`](crate::Error::NotConnected) before
/// `connect()` and with [`Error::Grounded`](crate::Error::Grounded) while the
/// vehicle is on the ground.
pub trait MotionActuator {
    /// Open the command session with the vehicle
    fn connect(&mut self) -> Result<()>;

    /// Close the command session
    fn disconnect(&mut self) -> Result<()>;

    fn takeoff(&mut self) -> Result<()>;

    fn land(&mut self) -> Result<()>;

    /// Translate `distance_cm` in a body-relative direction
    fn move_by(&mut self, direction: MoveDirection, distance_cm: u32) -> Result<()>;

    /// Yaw in place by `degrees`
    fn rotate(&mut self, direction: RotateDirection, degrees: u32) -> Result<()>;

    /// Battery level in percent
    fn battery(&mut self) -> Result<u8>;

    /// Height above the takeoff point (cm)
    fn height(&mut self) -> Result<u32>;

    /// Argument ranges this vehicle accepts
    fn limits(&self) -> CommandLimits;

    fn is_connected(&self) -> bool;

    fn is_airborne(&self) -> bool;

    /// Execute one primitive
    fn execute(&mut self, primitive: Primitive) -> Result<()> {
        match primitive {
            Primitive::Move {
                direction,
                distance_cm,
            } => self.move_by(direction, distance_cm),
            Primitive::Rotate { direction, degrees } => self.rotate(direction, degrees),
        }
    }
}

impl<A: MotionActuator + ?Sized> MotionActuator for Box<A> {
    fn connect(&mut self) -> Result<()> {
        (**self).connect()
    }

    fn disconnect(&mut self) -> Result<()> {
        (**self).disconnect()
    }

    fn takeoff(&mut self) -> Result<()> {
        (**self).takeoff()
    }

    fn land(&mut self) -> Result<()> {
        (**self).land()
    }

    fn move_by(&mut self, direction: MoveDirection, distance_cm: u32) -> Result<()> {
        (**self).move_by(direction, distance_cm)
    }

    fn rotate(&mut self, direction: RotateDirection, degrees: u32) -> Result<()> {
        (**self).rotate(direction, degrees)
    }

    fn battery(&mut self) -> Result<u8> {
        (**self).battery()
    }

    fn height(&mut self) -> Result<u32> {
        (**self).height()
    }

    fn limits(&self) -> CommandLimits {
        (**self).limits()
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn is_airborne(&self) -> bool {
        (**self).is_airborne()
    }

    fn execute(&mut self, primitive: Primitive) -> Result<()> {
        (**self).execute(primitive)
    }
}
