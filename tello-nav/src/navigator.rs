//! Flight planning
//!
//! Turns a world-frame target into a finite list of primitives from the
//! current dead-reckoned state. Planning is pure: nothing here talks to the
//! vehicle, so every plan can be inspected before it is flown.
//!
//! Two strategies:
//!
//! - [`FlightStrategy::Direct`]: one rotation to face the target, then one
//!   forward leg. Fewest primitives; this is the default.
//! - [`FlightStrategy::AxisAligned`]: no rotation. The displacement is
//!   split into a forward/back leg and a left/right leg relative to the
//!   current heading.
//!
//! Distances and angles are rounded to whole centimeters and degrees, the
//! resolution the vehicle accepts. A target that rounds to zero distance
//! yields an empty plan. [`check_plan`] vets a whole plan against the
//! vehicle's argument ranges before the first primitive is sent.

use serde::{Deserialize, Serialize};
use tello_io::config::CommandLimits;
use tello_io::{MoveDirection, Primitive};

use crate::error::NavigationError;
use crate::heading::Heading;
use crate::position::{Position, to_body_frame};

/// How `fly_to` reaches a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStrategy {
    /// Rotate to face the target, then fly forward
    #[default]
    Direct,
    /// Forward/back plus left/right legs without rotating
    AxisAligned,
}

fn check_target(x: f64, y: f64) -> Result<(), NavigationError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(NavigationError::InvalidTarget { x, y })
    }
}

/// Round a leg length to whole centimeters, refusing lengths no command can carry
fn whole_centimeters(length: f64, x: f64, y: f64) -> Result<u32, NavigationError> {
    let cm = length.abs().round();
    if cm > f64::from(u32::MAX) {
        return Err(NavigationError::InvalidTarget { x, y });
    }
    Ok(cm as u32)
}

/// Plan a direct flight from the current state to (x, y)
pub fn plan_direct(
    heading: &Heading,
    position: &Position,
    x: f64,
    y: f64,
) -> Result<Vec<Primitive>, NavigationError> {
    check_target(x, y)?;

    let distance = whole_centimeters(position.distance_to(x, y), x, y)?;
    if distance == 0 {
        return Ok(Vec::new());
    }

    let bearing = position.bearing_to(x, y)?;
    let mut plan = Vec::with_capacity(2);
    if let Some(turn) = heading.turn_to(bearing, false) {
        plan.push(turn);
    }
    plan.push(Primitive::forward(distance));

    tracing::debug!(
        "Direct plan to ({:.1}, {:.1}): bearing {:.2}°, distance {}cm, {} primitive(s)",
        x,
        y,
        bearing,
        distance,
        plan.len()
    );
    Ok(plan)
}

/// Plan an axis-aligned flight from the current state to (x, y)
pub fn plan_axis_aligned(
    heading: &Heading,
    position: &Position,
    x: f64,
    y: f64,
) -> Result<Vec<Primitive>, NavigationError> {
    check_target(x, y)?;

    let (forward, left) = to_body_frame(heading.degrees(), x - position.x(), y - position.y());
    let forward_cm = whole_centimeters(forward, x, y)?;
    let left_cm = whole_centimeters(left, x, y)?;

    let mut plan = Vec::with_capacity(2);
    if forward_cm > 0 {
        plan.push(if forward > 0.0 {
            Primitive::forward(forward_cm)
        } else {
            Primitive::back(forward_cm)
        });
    }
    if left_cm > 0 {
        plan.push(if left > 0.0 {
            Primitive::left(left_cm)
        } else {
            Primitive::right(left_cm)
        });
    }

    tracing::debug!(
        "Axis-aligned plan to ({:.1}, {:.1}) at heading {:.1}°: forward {}cm, left {}cm",
        x,
        y,
        heading.degrees(),
        forward.round(),
        left.round()
    );
    Ok(plan)
}

/// Plan a flight to (x, y) with the given strategy
pub fn plan(
    strategy: FlightStrategy,
    heading: &Heading,
    position: &Position,
    x: f64,
    y: f64,
) -> Result<Vec<Primitive>, NavigationError> {
    match strategy {
        FlightStrategy::Direct => plan_direct(heading, position, x, y),
        FlightStrategy::AxisAligned => plan_axis_aligned(heading, position, x, y),
    }
}

/// Check every primitive of a plan against the vehicle's argument ranges
///
/// The vehicle would reject an out-of-range primitive only when it is
/// reached, after the earlier ones had already been flown.
pub fn check_plan(plan: &[Primitive], limits: &CommandLimits) -> Result<(), NavigationError> {
    for primitive in plan {
        let (value, min, max) = match *primitive {
            Primitive::Move { distance_cm, .. } => {
                (distance_cm, limits.min_move_cm, limits.max_move_cm)
            }
            Primitive::Rotate { degrees, .. } => {
                (degrees, limits.min_rotation_deg, limits.max_rotation_deg)
            }
        };
        if !(min..=max).contains(&value) {
            return Err(NavigationError::OutOfLimits {
                primitive: *primitive,
                min,
                max,
            });
        }
    }
    Ok(())
}

/// Split translations longer than `max_leg_cm` into near-equal legs
///
/// A 1001cm leg with a 500cm limit becomes 334 + 334 + 333, so no piece
/// falls below the vehicle's minimum move. Rotations pass through.
pub fn split_long_legs(plan: &[Primitive], max_leg_cm: u32) -> Vec<Primitive> {
    let max_leg = max_leg_cm.max(1);
    let mut out = Vec::with_capacity(plan.len());

    for primitive in plan {
        match *primitive {
            Primitive::Move {
                direction,
                distance_cm,
            } if distance_cm > max_leg => {
                out.extend(split_move(direction, distance_cm, max_leg));
            }
            other => out.push(other),
        }
    }
    out
}

fn split_move(direction: MoveDirection, distance_cm: u32, max_leg: u32) -> Vec<Primitive> {
    let legs = distance_cm.div_ceil(max_leg);
    let base = distance_cm / legs;
    let extra = distance_cm % legs;
    (0..legs)
        .map(|i| Primitive::Move {
            direction,
            distance_cm: if i < extra { base + 1 } else { base },
        })
        .collect()
}
