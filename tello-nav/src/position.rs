//! Position tracker
//!
//! World-frame (x, y) offset from the takeoff point in centimeters. The
//! world frame is fixed at takeoff: +x along the initial heading, +y to its
//! left. Each executed translation is resolved into world deltas with
//! [`project`]; values accumulate in `f64` and are only rounded when queried.

use tello_io::MoveDirection;

use crate::error::NavigationError;
use crate::utils::normalize_degrees;

/// Angles closer than this to an axis are treated as exactly on it
const AXIS_EPSILON_DEG: f64 = 1e-9;

/// Dead-reckoned position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    x: f64,
    y: f64,
}

/// Unit vector (cos, sin) for a world angle in degrees
///
/// Exact on the four axes so that axis-aligned motion never leaks a
/// floating-point residue onto the orthogonal axis.
fn unit_vector(angle: f64) -> (f64, f64) {
    let a = normalize_degrees(angle);
    for (axis, unit) in [
        (0.0, (1.0, 0.0)),
        (90.0, (0.0, 1.0)),
        (180.0, (-1.0, 0.0)),
        (270.0, (0.0, -1.0)),
        (360.0, (1.0, 0.0)),
    ] {
        if (a - axis).abs() < AXIS_EPSILON_DEG {
            return unit;
        }
    }
    let (sin, cos) = a.to_radians().sin_cos();
    (cos, sin)
}

/// Offset of a body-relative direction from the heading (degrees)
///
/// `None` for vertical moves, which have no horizontal component.
fn direction_offset(direction: MoveDirection) -> Option<f64> {
    match direction {
        MoveDirection::Forward => Some(0.0),
        MoveDirection::Left => Some(90.0),
        MoveDirection::Back => Some(180.0),
        MoveDirection::Right => Some(-90.0),
        MoveDirection::Up | MoveDirection::Down => None,
    }
}

/// World-frame (dx, dy) of a body-relative move made at `heading` degrees
pub fn project(heading: f64, direction: MoveDirection, distance: f64) -> (f64, f64) {
    match direction_offset(direction) {
        Some(offset) => {
            let (cos, sin) = unit_vector(heading + offset);
            (distance * cos, distance * sin)
        }
        None => (0.0, 0.0),
    }
}

/// Body-frame (forward, left) components of a world displacement
///
/// Inverse of [`project`]: flying `forward` then `left` at `heading`
/// reproduces (dx, dy).
pub fn to_body_frame(heading: f64, dx: f64, dy: f64) -> (f64, f64) {
    let (cos, sin) = unit_vector(heading);
    (dx * cos + dy * sin, -dx * sin + dy * cos)
}

impl Position {
    /// Takeoff point
    pub fn origin() -> Self {
        Self::default()
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Position rounded to whole centimeters
    pub fn rounded(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    /// Straight-line distance to the takeoff point
    pub fn distance_to_origin(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to an arbitrary point
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (x - self.x).hypot(y - self.y)
    }

    /// World bearing from here to (x, y), degrees in [0, 360)
    pub fn bearing_to(&self, x: f64, y: f64) -> Result<f64, NavigationError> {
        let dx = x - self.x;
        let dy = y - self.y;
        if !dx.is_finite() || !dy.is_finite() {
            return Err(NavigationError::InvalidTarget { x, y });
        }
        if dx == 0.0 && dy == 0.0 {
            return Err(NavigationError::UndefinedAngle);
        }
        Ok(normalize_degrees(dy.atan2(dx).to_degrees()))
    }

    /// World bearing from here back to the takeoff point
    pub fn bearing_to_origin(&self) -> Result<f64, NavigationError> {
        self.bearing_to(0.0, 0.0)
    }

    /// Record an executed translation made at `heading` degrees
    pub(crate) fn apply(&mut self, heading: f64, direction: MoveDirection, distance_cm: u32) {
        let (dx, dy) = project(heading, direction, f64::from(distance_cm));
        self.x += dx;
        self.y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_at_zero_heading() {
        let mut pos = Position::origin();
        pos.apply(0.0, MoveDirection::Forward, 100);
        assert_eq!(pos.x(), 100.0);
        assert_eq!(pos.y(), 0.0);
    }

    #[test]
    fn test_axis_exact_headings() {
        // Every direction at every axis heading lands exactly on an axis
        for heading in [0.0, 90.0, 180.0, 270.0] {
            for direction in [
                MoveDirection::Forward,
                MoveDirection::Back,
                MoveDirection::Left,
                MoveDirection::Right,
            ] {
                let (dx, dy) = project(heading, direction, 37.0);
                assert!(
                    dx == 0.0 || dy == 0.0,
                    "heading {heading} {direction:?} leaked ({dx}, {dy})"
                );
                assert_eq!(dx.abs() + dy.abs(), 37.0);
            }
        }
    }

    #[test]
    fn test_direction_signs() {
        assert_eq!(project(0.0, MoveDirection::Left, 10.0), (0.0, 10.0));
        assert_eq!(project(0.0, MoveDirection::Right, 10.0), (0.0, -10.0));
        assert_eq!(project(0.0, MoveDirection::Back, 10.0), (-10.0, 0.0));
        assert_eq!(project(90.0, MoveDirection::Forward, 10.0), (0.0, 10.0));
        assert_eq!(project(90.0, MoveDirection::Right, 10.0), (10.0, 0.0));
        assert_eq!(project(270.0, MoveDirection::Left, 10.0), (10.0, 0.0));
        assert_eq!(project(0.0, MoveDirection::Up, 10.0), (0.0, 0.0));
    }

    #[test]
    fn test_oblique_projection() {
        let (dx, dy) = project(45.0, MoveDirection::Forward, 100.0);
        assert_relative_eq!(dx, 70.710678, epsilon = 1e-5);
        assert_relative_eq!(dy, 70.710678, epsilon = 1e-5);

        let (dx, dy) = project(30.0, MoveDirection::Right, 100.0);
        assert_relative_eq!(dx, 50.0, epsilon = 1e-9);
        assert_relative_eq!(dy, -86.602540, epsilon = 1e-5);
    }

    #[test]
    fn test_body_frame_inverts_projection() {
        for heading in [0.0, 33.0, 90.0, 147.0, 215.0, 270.0, 301.0] {
            let (fx, fy) = project(heading, MoveDirection::Forward, 80.0);
            let (lx, ly) = project(heading, MoveDirection::Left, 25.0);
            let (forward, left) = to_body_frame(heading, fx + lx, fy + ly);
            assert_relative_eq!(forward, 80.0, epsilon = 1e-9);
            assert_relative_eq!(left, 25.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_no_rounding_drift() {
        // 100 moves of 1cm at 30°: per-move rounding would lose the y axis
        let mut pos = Position::origin();
        for _ in 0..100 {
            pos.apply(30.0, MoveDirection::Forward, 1);
        }
        assert_eq!(pos.rounded(), (87, 50));
    }

    #[test]
    fn test_distance_and_bearing() {
        let mut pos = Position::origin();
        pos.apply(0.0, MoveDirection::Forward, 30);
        pos.apply(0.0, MoveDirection::Left, 40);

        assert_relative_eq!(pos.distance_to_origin(), 50.0);
        assert_relative_eq!(pos.distance_to(30.0, 0.0), 40.0);
        assert_relative_eq!(
            pos.bearing_to_origin().unwrap(),
            233.130102,
            epsilon = 1e-5
        );
        assert_relative_eq!(pos.bearing_to(30.0, 100.0).unwrap(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_undefined_at_target() {
        let pos = Position::origin();
        assert_eq!(pos.bearing_to_origin(), Err(NavigationError::UndefinedAngle));
        assert!(matches!(
            pos.bearing_to(f64::NAN, 0.0),
            Err(NavigationError::InvalidTarget { .. })
        ));
    }
}
