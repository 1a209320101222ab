//! Heading tracker
//!
//! Yaw in degrees relative to the takeoff heading, always in [0, 360).
//! Counter-clockwise rotation increases the heading, clockwise decreases it.
//! Only executed rotation primitives change it.

use tello_io::{Primitive, RotateDirection};

use crate::utils::{normalize_degrees, signed_delta};

/// Dead-reckoned heading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Heading {
    degrees: f64,
}

impl Heading {
    /// Heading at takeoff (0°)
    pub fn new() -> Self {
        Self::default()
    }

    /// Current heading in [0, 360)
    #[inline]
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    /// Record an executed rotation
    pub(crate) fn apply(&mut self, direction: RotateDirection, degrees: u32) {
        self.degrees = normalize_degrees(self.degrees + direction.sign() * f64::from(degrees));
    }

    /// Rotation primitive that turns this heading to `target` degrees
    ///
    /// Takes the shorter way round. When both ways are exactly 180°, homing
    /// turns clockwise and anything else turns counter-clockwise. The turn is
    /// rounded to whole degrees; `None` when that leaves nothing to do.
    pub fn turn_to(&self, target: f64, homing: bool) -> Option<Primitive> {
        let delta = signed_delta(self.degrees, target);
        let magnitude = delta.abs().round() as u32;

        if magnitude == 0 {
            return None;
        }

        let direction = if magnitude == 180 {
            if homing {
                RotateDirection::Clockwise
            } else {
                RotateDirection::CounterClockwise
            }
        } else if delta > 0.0 {
            RotateDirection::CounterClockwise
        } else {
            RotateDirection::Clockwise
        };

        Some(Primitive::Rotate {
            direction,
            degrees: magnitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_arithmetic() {
        let mut heading = Heading::new();

        heading.apply(RotateDirection::CounterClockwise, 90);
        assert_eq!(heading.degrees(), 90.0);

        heading.apply(RotateDirection::Clockwise, 180);
        assert_eq!(heading.degrees(), 270.0);

        heading.apply(RotateDirection::CounterClockwise, 450);
        assert_eq!(heading.degrees(), 0.0);
    }

    #[test]
    fn test_full_turns_close() {
        let mut heading = Heading::new();
        heading.apply(RotateDirection::CounterClockwise, 37);
        let start = heading.degrees();

        for degrees in [120, 95, 145] {
            heading.apply(RotateDirection::Clockwise, degrees);
        }
        assert_eq!(heading.degrees(), start);

        for _ in 0..8 {
            heading.apply(RotateDirection::CounterClockwise, 45);
        }
        assert_eq!(heading.degrees(), start);
    }

    #[test]
    fn test_turn_takes_shorter_way() {
        let mut heading = Heading::new();
        heading.apply(RotateDirection::CounterClockwise, 10);

        assert_eq!(heading.turn_to(350.0, false), Some(Primitive::clockwise(20)));
        assert_eq!(heading.turn_to(100.0, false), Some(Primitive::counter_clockwise(90)));
        assert_eq!(heading.turn_to(10.0, false), None);
        assert_eq!(heading.turn_to(10.4, false), None);
    }

    #[test]
    fn test_half_turn_tie_break() {
        let heading = Heading::new();

        assert_eq!(heading.turn_to(180.0, true), Some(Primitive::clockwise(180)));
        assert_eq!(heading.turn_to(180.0, false), Some(Primitive::counter_clockwise(180)));
        // Float jitter around the tie still resolves deterministically
        assert_eq!(heading.turn_to(179.9999999, true), Some(Primitive::clockwise(180)));
        assert_eq!(heading.turn_to(180.0000001, false), Some(Primitive::counter_clockwise(180)));
    }

    #[test]
    fn test_homing_back_to_zero() {
        let mut heading = Heading::new();
        heading.apply(RotateDirection::CounterClockwise, 233);

        let turn = heading.turn_to(0.0, true).unwrap();
        assert_eq!(turn, Primitive::counter_clockwise(127));

        if let Primitive::Rotate { direction, degrees } = turn {
            heading.apply(direction, degrees);
        }
        assert_eq!(heading.degrees(), 0.0);
    }
}
