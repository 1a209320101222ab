//! Command primitives exchanged with a motion actuator.
//!
//! A [`Primitive`] is one atomic actuator command: a single move or a single
//! rotation. The navigation layer never sends anything larger; a request such
//! as "fly to (x, y)" is decomposed into a finite list of primitives first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body-relative translation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    /// Tello SDK command word for this direction
    pub fn sdk_command(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// True for moves in the horizontal plane (the ones dead reckoning tracks)
    pub fn is_horizontal(self) -> bool {
        !matches!(self, Self::Up | Self::Down)
    }
}

/// Yaw rotation direction
///
/// Seen from above, clockwise decreases heading and counter-clockwise
/// increases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// Tello SDK command word for this direction
    pub fn sdk_command(self) -> &'static str {
        match self {
            Self::Clockwise => "cw",
            Self::CounterClockwise => "ccw",
        }
    }

    /// Sign of the heading change produced by this direction
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }
}

/// One atomic actuator command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Translate `distance_cm` in a body-relative direction
    Move {
        direction: MoveDirection,
        distance_cm: u32,
    },
    /// Yaw in place by `degrees`
    Rotate {
        direction: RotateDirection,
        degrees: u32,
    },
}

impl Primitive {
    pub fn forward(distance_cm: u32) -> Self {
        Self::Move {
            direction: MoveDirection::Forward,
            distance_cm,
        }
    }

    pub fn back(distance_cm: u32) -> Self {
        Self::Move {
            direction: MoveDirection::Back,
            distance_cm,
        }
    }

    pub fn left(distance_cm: u32) -> Self {
        Self::Move {
            direction: MoveDirection::Left,
            distance_cm,
        }
    }

    pub fn right(distance_cm: u32) -> Self {
        Self::Move {
            direction: MoveDirection::Right,
            distance_cm,
        }
    }

    pub fn clockwise(degrees: u32) -> Self {
        Self::Rotate {
            direction: RotateDirection::Clockwise,
            degrees,
        }
    }

    pub fn counter_clockwise(degrees: u32) -> Self {
        Self::Rotate {
            direction: RotateDirection::CounterClockwise,
            degrees,
        }
    }

    /// Tello SDK command line for this primitive (e.g. `forward 100`)
    pub fn sdk_command(&self) -> String {
        match self {
            Self::Move {
                direction,
                distance_cm,
            } => format!("{} {}", direction.sdk_command(), distance_cm),
            Self::Rotate { direction, degrees } => {
                format!("{} {}", direction.sdk_command(), degrees)
            }
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move {
                direction,
                distance_cm,
            } => write!(f, "{:?} {}cm", direction, distance_cm),
            Self::Rotate { direction, degrees } => write!(f, "{:?} {}°", direction, degrees),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_commands() {
        assert_eq!(Primitive::forward(100).sdk_command(), "forward 100");
        assert_eq!(Primitive::left(20).sdk_command(), "left 20");
        assert_eq!(Primitive::clockwise(90).sdk_command(), "cw 90");
        assert_eq!(Primitive::counter_clockwise(45).sdk_command(), "ccw 45");
        let up = Primitive::Move {
            direction: MoveDirection::Up,
            distance_cm: 30,
        };
        assert_eq!(up.sdk_command(), "up 30");
    }

    #[test]
    fn test_rotation_sign() {
        assert_eq!(RotateDirection::Clockwise.sign(), -1.0);
        assert_eq!(RotateDirection::CounterClockwise.sign(), 1.0);
    }

    #[test]
    fn test_horizontal_moves() {
        assert!(MoveDirection::Forward.is_horizontal());
        assert!(MoveDirection::Right.is_horizontal());
        assert!(!MoveDirection::Up.is_horizontal());
        assert!(!MoveDirection::Down.is_horizontal());
    }
}
