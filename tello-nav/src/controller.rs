//! Flight controller
//!
//! Wraps one [`MotionActuator`] and keeps the dead-reckoned heading and
//! position for it. The controller holds the vehicle rather than being it,
//! so the same mission code flies the real drone or the simulator.
//!
//! Every motion goes through [`FlightController::execute`]: the primitive is
//! sent first and the trackers are only updated once the actuator reports
//! success. A failed primitive leaves heading and position untouched and
//! aborts whatever sequence it belonged to; nothing is retried.
//!
//! Multi-primitive maneuvers are checked as a whole against the vehicle's
//! command ranges and the tether before anything is sent, so a maneuver the
//! vehicle cannot complete is refused instead of being flown part-way.

use tello_io::config::CommandLimits;
use tello_io::{MotionActuator, MoveDirection, Primitive, RotateDirection};
use tracing::{info, warn};

use crate::config::FlightConfig;
use crate::error::{NavigationError, Result};
use crate::heading::Heading;
use crate::navigator::{self, FlightStrategy};
use crate::position::{Position, project};

/// Dead-reckoning flight controller for one vehicle
pub struct FlightController<A: MotionActuator> {
    actuator: A,
    config: FlightConfig,
    heading: Heading,
    position: Position,
}

impl<A: MotionActuator> FlightController<A> {
    /// Connect to the vehicle and start dead reckoning at the origin
    ///
    /// The connect point is (0, 0) facing 0°. Nothing carries over from an
    /// earlier session.
    pub fn connect(mut actuator: A, config: FlightConfig) -> Result<Self> {
        actuator.connect()?;
        info!(
            "Connected; dead reckoning reset to origin (max leg {}cm, tether {:?})",
            config.max_leg_cm, config.tether_cm
        );

        Ok(Self {
            actuator,
            config,
            heading: Heading::new(),
            position: Position::origin(),
        })
    }

    pub fn takeoff(&mut self) -> Result<()> {
        self.actuator.takeoff()?;
        info!("Takeoff complete");
        Ok(())
    }

    pub fn land(&mut self) -> Result<()> {
        self.actuator.land()?;
        let (x, y) = self.position.rounded();
        info!("Landed at ({}, {})", x, y);
        Ok(())
    }

    /// Close the vehicle session
    pub fn disconnect(&mut self) -> Result<()> {
        if self.actuator.is_connected() {
            self.actuator.disconnect()?;
            info!("Disconnected");
        }
        Ok(())
    }

    /// Execute one primitive and fold it into dead reckoning
    pub fn execute(&mut self, primitive: Primitive) -> Result<()> {
        self.actuator.execute(primitive)?;

        match primitive {
            Primitive::Move {
                direction,
                distance_cm,
            } => {
                self.position
                    .apply(self.heading.degrees(), direction, distance_cm);
            }
            Primitive::Rotate { direction, degrees } => {
                self.heading.apply(direction, degrees);
            }
        }

        info!(
            "{} -> position ({:.1}, {:.1}), heading {:.1}°",
            primitive,
            self.position.x(),
            self.position.y(),
            self.heading.degrees()
        );
        Ok(())
    }

    fn limits(&self) -> CommandLimits {
        self.actuator.limits()
    }

    /// Split long legs and vet the result against the vehicle's ranges
    fn prepare(&self, plan: &[Primitive]) -> Result<Vec<Primitive>> {
        let limits = self.limits();
        let max_leg = self.config.max_leg_cm.min(limits.max_move_cm);
        let plan = navigator::split_long_legs(plan, max_leg);
        navigator::check_plan(&plan, &limits)?;
        Ok(plan)
    }

    /// Refuse horizontal destinations outside the tether radius
    fn check_tether(&self, x: f64, y: f64) -> Result<()> {
        if let Some(tether_cm) = self.config.tether_cm {
            let distance_cm = x.hypot(y);
            if distance_cm.round() > f64::from(tether_cm) {
                return Err(NavigationError::BeyondTether {
                    distance_cm,
                    tether_cm,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Execute primitives in order, stopping at the first failure
    fn execute_all(&mut self, plan: &[Primitive]) -> Result<()> {
        for (i, primitive) in plan.iter().enumerate() {
            if let Err(e) = self.execute(*primitive) {
                warn!(
                    "Primitive {}/{} ({}) failed, abandoning the rest: {}",
                    i + 1,
                    plan.len(),
                    primitive,
                    e
                );
                return Err(e);
            }
        }
        Ok(())
    }

    fn translate(&mut self, direction: MoveDirection, distance_cm: u32) -> Result<()> {
        if distance_cm == 0 {
            return Ok(());
        }
        if direction.is_horizontal() {
            let (dx, dy) = project(self.heading.degrees(), direction, f64::from(distance_cm));
            self.check_tether(self.position.x() + dx, self.position.y() + dy)?;
        }
        let plan = self.prepare(&[Primitive::Move {
            direction,
            distance_cm,
        }])?;
        self.execute_all(&plan)
    }

    fn turn(&mut self, direction: RotateDirection, degrees: u32) -> Result<()> {
        if degrees == 0 {
            return Ok(());
        }
        let plan = self.prepare(&[Primitive::Rotate { direction, degrees }])?;
        self.execute_all(&plan)
    }

    pub fn fly_forward(&mut self, cm: u32) -> Result<()> {
        self.translate(MoveDirection::Forward, cm)
    }

    pub fn fly_back(&mut self, cm: u32) -> Result<()> {
        self.translate(MoveDirection::Back, cm)
    }

    pub fn fly_left(&mut self, cm: u32) -> Result<()> {
        self.translate(MoveDirection::Left, cm)
    }

    pub fn fly_right(&mut self, cm: u32) -> Result<()> {
        self.translate(MoveDirection::Right, cm)
    }

    /// Climb; does not affect the horizontal position
    pub fn fly_up(&mut self, cm: u32) -> Result<()> {
        self.translate(MoveDirection::Up, cm)
    }

    /// Descend; does not affect the horizontal position
    pub fn fly_down(&mut self, cm: u32) -> Result<()> {
        self.translate(MoveDirection::Down, cm)
    }

    /// Climb or descend to `target_cm` above the takeoff point
    ///
    /// Uses the vehicle's own height reading. A gap smaller than the
    /// vehicle's shortest move is left as it is.
    pub fn fly_to_height(&mut self, target_cm: u32) -> Result<()> {
        let height = self.actuator.height()?;
        let gap = height.abs_diff(target_cm);
        let min_move = self.limits().min_move_cm;

        if gap == 0 || gap < min_move {
            info!(
                "At {}cm, within {}cm of {}cm; holding altitude",
                height, gap, target_cm
            );
            return Ok(());
        }

        info!("Changing altitude {}cm -> {}cm", height, target_cm);
        if target_cm > height {
            self.fly_up(gap)
        } else {
            self.fly_down(gap)
        }
    }

    pub fn rotate_clockwise(&mut self, degrees: u32) -> Result<()> {
        self.turn(RotateDirection::Clockwise, degrees)
    }

    pub fn rotate_counter_clockwise(&mut self, degrees: u32) -> Result<()> {
        self.turn(RotateDirection::CounterClockwise, degrees)
    }

    /// Turn to face a world bearing in degrees
    ///
    /// Takes the shorter way round; an exact half turn goes clockwise when
    /// `homing` and counter-clockwise otherwise.
    pub fn rotate_to_bearing(&mut self, target_degrees: f64, homing: bool) -> Result<()> {
        if !target_degrees.is_finite() {
            return Err(NavigationError::InvalidTarget {
                x: target_degrees,
                y: 0.0,
            }
            .into());
        }
        match self.heading.turn_to(target_degrees, homing) {
            Some(Primitive::Rotate { direction, degrees }) => self.turn(direction, degrees),
            _ => Ok(()),
        }
    }

    /// Fly to world coordinates (cm) and return the primitives issued
    ///
    /// Nothing is sent unless every primitive of the plan is within the
    /// vehicle's ranges and the target is inside the tether. If the vehicle
    /// then fails a primitive, the ones before it stay reflected in the
    /// dead-reckoned state and the rest are not sent.
    pub fn fly_to(&mut self, x: f64, y: f64, strategy: FlightStrategy) -> Result<Vec<Primitive>> {
        let plan = navigator::plan(strategy, &self.heading, &self.position, x, y)?;
        if plan.is_empty() {
            info!("Already at ({:.0}, {:.0}), nothing to fly", x, y);
            return Ok(plan);
        }

        self.check_tether(x, y)?;
        let plan = self.prepare(&plan)?;
        info!(
            "Flying to ({:.0}, {:.0}) {:?}: {} primitive(s)",
            x,
            y,
            strategy,
            plan.len()
        );
        self.execute_all(&plan)?;
        Ok(plan)
    }

    /// Fly straight back to the origin, then face the takeoff heading
    ///
    /// A residual offset shorter than the vehicle's minimum move cannot be
    /// flown and counts as home.
    pub fn fly_home(&mut self) -> Result<Vec<Primitive>> {
        let residual = self.position.distance_to_origin();
        let mut issued = if residual.round() < f64::from(self.limits().min_move_cm) {
            if residual.round() > 0.0 {
                info!(
                    "{:.1}cm from origin, below the shortest move; treating as home",
                    residual
                );
            }
            Vec::new()
        } else {
            self.fly_to(0.0, 0.0, FlightStrategy::Direct)?
        };

        if let Some(turn) = self.heading.turn_to(0.0, true) {
            let turn = self.prepare(&[turn])?;
            self.execute_all(&turn)?;
            issued.extend(turn);
        }
        info!("Home: {} primitive(s)", issued.len());
        Ok(issued)
    }

    /// Dead-reckoned heading in degrees, [0, 360)
    pub fn current_heading(&self) -> f64 {
        self.heading.degrees()
    }

    /// Dead-reckoned position rounded to whole centimeters
    pub fn current_position(&self) -> (i32, i32) {
        self.position.rounded()
    }

    /// Dead-reckoned position without rounding
    pub fn raw_position(&self) -> (f64, f64) {
        (self.position.x(), self.position.y())
    }

    /// Straight-line distance to the origin (cm)
    pub fn distance_to_origin(&self) -> f64 {
        self.position.distance_to_origin()
    }

    /// Distance to the origin rounded to whole centimeters
    pub fn hypotenuse(&self) -> i32 {
        self.position.distance_to_origin().round() as i32
    }

    /// World bearing from the current position back to the origin
    pub fn bearing_to_origin(&self) -> std::result::Result<f64, NavigationError> {
        self.position.bearing_to_origin()
    }

    /// Battery level in percent
    pub fn battery(&mut self) -> Result<u8> {
        Ok(self.actuator.battery()?)
    }

    /// Height above the takeoff point as the vehicle reports it (cm)
    pub fn height(&mut self) -> Result<u32> {
        Ok(self.actuator.height()?)
    }

    pub fn is_airborne(&self) -> bool {
        self.actuator.is_airborne()
    }

    pub fn flight_config(&self) -> &FlightConfig {
        &self.config
    }
}

impl<A: MotionActuator> Drop for FlightController<A> {
    fn drop(&mut self) {
        if let Err(e) = self.disconnect() {
            warn!("Disconnect on drop failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;
    use tello_io::DeviceConfig;
    use tello_io::devices::sim::SimulatedTello;

    fn flying_with(config: FlightConfig) -> (FlightController<SimulatedTello>, SimulatedTello) {
        let sim = SimulatedTello::new(&DeviceConfig::default());
        let mut controller = FlightController::connect(sim.clone(), config).unwrap();
        controller.takeoff().unwrap();
        (controller, sim)
    }

    fn flying() -> (FlightController<SimulatedTello>, SimulatedTello) {
        flying_with(FlightConfig::default())
    }

    #[test]
    fn test_connect_resets_to_origin() {
        let (controller, _sim) = flying();
        assert_eq!(controller.current_position(), (0, 0));
        assert_eq!(controller.current_heading(), 0.0);
        assert_eq!(controller.hypotenuse(), 0);
    }

    #[test]
    fn test_zero_moves_are_skipped() {
        let (mut controller, sim) = flying();
        controller.fly_forward(0).unwrap();
        controller.rotate_clockwise(0).unwrap();
        controller.rotate_to_bearing(0.0, false).unwrap();
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_vertical_moves_keep_position() {
        let (mut controller, sim) = flying();
        controller.fly_up(50).unwrap();
        controller.fly_down(30).unwrap();
        assert_eq!(controller.current_position(), (0, 0));
        assert_eq!(sim.history().len(), 2);
    }

    #[test]
    fn test_long_leg_is_split() {
        let (mut controller, sim) = flying();
        controller.fly_forward(1200).unwrap();

        assert_eq!(
            sim.history(),
            vec![
                Primitive::forward(400),
                Primitive::forward(400),
                Primitive::forward(400)
            ]
        );
        assert_eq!(controller.current_position(), (1200, 0));
    }

    #[test]
    fn test_failed_chunk_keeps_earlier_legs() {
        let (mut controller, sim) = flying();
        controller.fly_forward(100).unwrap();
        sim.fail_next(tello_io::Error::Grounded);

        let result = controller.fly_left(60);

        assert!(matches!(
            result,
            Err(NavError::Actuator(tello_io::Error::Grounded))
        ));
        assert_eq!(controller.current_position(), (100, 0));
    }

    #[test]
    fn test_short_direct_leg_sends_nothing() {
        let (mut controller, sim) = flying();

        let result = controller.fly_to(10.0, 5.0, FlightStrategy::Direct);

        assert!(matches!(
            result,
            Err(NavError::Navigation(NavigationError::OutOfLimits { min: 20, .. }))
        ));
        assert!(sim.history().is_empty());
        assert_eq!(controller.current_heading(), 0.0);
        assert_eq!(controller.current_position(), (0, 0));
    }

    #[test]
    fn test_short_cross_leg_sends_nothing() {
        let (mut controller, sim) = flying();

        let result = controller.fly_to(100.0, 10.0, FlightStrategy::AxisAligned);

        assert!(matches!(
            result,
            Err(NavError::Navigation(NavigationError::OutOfLimits {
                primitive: Primitive::Move {
                    direction: MoveDirection::Left,
                    distance_cm: 10
                },
                ..
            }))
        ));
        assert!(sim.history().is_empty());
        assert_eq!(controller.current_position(), (0, 0));
    }

    #[test]
    fn test_short_body_move_sends_nothing() {
        let (mut controller, sim) = flying();
        assert!(matches!(
            controller.fly_right(5),
            Err(NavError::Navigation(NavigationError::OutOfLimits { .. }))
        ));
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_home_holds_on_small_residual() {
        let (mut controller, sim) = flying();
        controller.fly_forward(100).unwrap();
        controller.rotate_counter_clockwise(179).unwrap();
        controller.fly_forward(100).unwrap();
        assert_eq!(controller.hypotenuse(), 2);
        sim.clear_history();

        let issued = controller.fly_home().unwrap();

        assert_eq!(issued, vec![Primitive::clockwise(179)]);
        assert_eq!(sim.history(), issued);
        assert_eq!(controller.current_heading(), 0.0);

        // Nothing left to do on a second call
        assert!(controller.fly_home().unwrap().is_empty());
        assert_eq!(controller.current_heading(), 0.0);
    }

    #[test]
    fn test_tether_refuses_far_targets() {
        let config = FlightConfig {
            tether_cm: Some(300),
            ..FlightConfig::default()
        };
        let (mut controller, sim) = flying_with(config);

        controller.fly_to(180.0, 240.0, FlightStrategy::Direct).unwrap();
        controller.fly_home().unwrap();
        sim.clear_history();

        assert!(matches!(
            controller.fly_to(250.0, 250.0, FlightStrategy::Direct),
            Err(NavError::Navigation(NavigationError::BeyondTether {
                tether_cm: 300,
                ..
            }))
        ));
        controller.fly_forward(250).unwrap();
        assert!(matches!(
            controller.fly_forward(100),
            Err(NavError::Navigation(NavigationError::BeyondTether { .. }))
        ));
        assert_eq!(sim.history(), vec![Primitive::forward(250)]);
        assert_eq!(controller.current_position(), (250, 0));

        // Climbing does not pull on the tether
        controller.fly_up(100).unwrap();
    }

    #[test]
    fn test_fly_to_height() {
        let (mut controller, sim) = flying();
        assert_eq!(controller.height().unwrap(), 80);

        controller.fly_to_height(300).unwrap();
        assert_eq!(controller.height().unwrap(), 300);

        controller.fly_to_height(100).unwrap();
        assert_eq!(controller.height().unwrap(), 100);

        // A 10cm gap is below the shortest move
        controller.fly_to_height(110).unwrap();
        assert_eq!(controller.height().unwrap(), 100);

        assert_eq!(
            sim.history(),
            vec![
                Primitive::Move {
                    direction: MoveDirection::Up,
                    distance_cm: 220
                },
                Primitive::Move {
                    direction: MoveDirection::Down,
                    distance_cm: 200
                },
            ]
        );
        assert_eq!(controller.current_position(), (0, 0));
    }

    #[test]
    fn test_rotation_beyond_limit_sends_nothing() {
        let (mut controller, sim) = flying();
        assert!(controller.rotate_clockwise(400).is_err());
        assert!(sim.history().is_empty());
        assert_eq!(controller.current_heading(), 0.0);
    }

    #[test]
    fn test_rotate_to_bearing_rejects_nan() {
        let (mut controller, sim) = flying();
        assert!(matches!(
            controller.rotate_to_bearing(f64::NAN, false),
            Err(NavError::Navigation(NavigationError::InvalidTarget { .. }))
        ));
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_drop_disconnects() {
        let (controller, sim) = flying();
        drop(controller);
        assert!(!sim.is_connected());
        assert!(!sim.is_airborne());
    }
}
