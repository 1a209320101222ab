//! Mission files
//!
//! A mission is an ordered list of steps read from TOML:
//!
//! ```toml
//! name = "square"
//!
//! [[steps]]
//! action = "takeoff"
//!
//! [[steps]]
//! action = "fly_to"
//! x = 100
//! y = 50
//! strategy = "axis_aligned"
//!
//! [[steps]]
//! action = "fly_home"
//! ```
//!
//! A mission may set its own `floor_cm` / `ceiling_cm` for the
//! `go_to_floor` / `go_to_ceiling` steps; otherwise the `[mission]` table of
//! the configuration supplies them.
//!
//! Steps run strictly in order. If one fails, the remaining steps are
//! skipped and the vehicle is landed if it is still in the air.

use serde::Deserialize;
use std::path::Path;
use tello_io::MotionActuator;
use tracing::{error, info, warn};

use crate::config::MissionConfig;
use crate::controller::FlightController;
use crate::error::{NavError, Result};
use crate::navigator::FlightStrategy;

/// A named sequence of flight steps
#[derive(Clone, Debug, Deserialize)]
pub struct Mission {
    #[serde(default = "default_name")]
    pub name: String,
    /// Overrides the configured floor
    #[serde(default)]
    pub floor_cm: Option<u32>,
    /// Overrides the configured ceiling
    #[serde(default)]
    pub ceiling_cm: Option<u32>,
    #[serde(default)]
    pub steps: Vec<MissionStep>,
}

/// Altitudes the `go_to_floor` / `go_to_ceiling` steps fly to (cm)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AltitudeBand {
    pub floor_cm: u32,
    pub ceiling_cm: u32,
}

fn default_name() -> String {
    "mission".to_string()
}

/// One mission step
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MissionStep {
    Takeoff,
    Land,
    Forward { cm: u32 },
    Back { cm: u32 },
    Left { cm: u32 },
    Right { cm: u32 },
    Up { cm: u32 },
    Down { cm: u32 },
    GoToFloor,
    GoToCeiling,
    RotateCw { degrees: u32 },
    RotateCcw { degrees: u32 },
    RotateToBearing {
        degrees: f64,
        #[serde(default)]
        homing: bool,
    },
    FlyTo {
        x: f64,
        y: f64,
        /// Falls back to the configured default strategy
        #[serde(default)]
        strategy: Option<FlightStrategy>,
    },
    FlyHome,
}

impl Mission {
    /// Load a mission from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NavError::Config(format!(
                "Failed to read mission file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mission: Mission = toml::from_str(&content)?;
        Ok(mission)
    }

    /// Altitude band for this mission, falling back to `defaults`
    pub fn band(&self, defaults: &MissionConfig) -> Result<AltitudeBand> {
        let floor_cm = self.floor_cm.unwrap_or(defaults.floor_cm);
        let ceiling_cm = self.ceiling_cm.unwrap_or(defaults.ceiling_cm);
        MissionConfig::check_band(floor_cm, ceiling_cm)?;
        Ok(AltitudeBand {
            floor_cm,
            ceiling_cm,
        })
    }
}

impl<A: MotionActuator> FlightController<A> {
    /// Run a single mission step
    pub fn run_step(&mut self, step: &MissionStep, band: &AltitudeBand) -> Result<()> {
        let default_strategy = self.flight_config().default_strategy;
        match *step {
            MissionStep::Takeoff => self.takeoff(),
            MissionStep::Land => self.land(),
            MissionStep::Forward { cm } => self.fly_forward(cm),
            MissionStep::Back { cm } => self.fly_back(cm),
            MissionStep::Left { cm } => self.fly_left(cm),
            MissionStep::Right { cm } => self.fly_right(cm),
            MissionStep::Up { cm } => self.fly_up(cm),
            MissionStep::Down { cm } => self.fly_down(cm),
            MissionStep::GoToFloor => self.fly_to_height(band.floor_cm),
            MissionStep::GoToCeiling => self.fly_to_height(band.ceiling_cm),
            MissionStep::RotateCw { degrees } => self.rotate_clockwise(degrees),
            MissionStep::RotateCcw { degrees } => self.rotate_counter_clockwise(degrees),
            MissionStep::RotateToBearing { degrees, homing } => {
                self.rotate_to_bearing(degrees, homing)
            }
            MissionStep::FlyTo { x, y, strategy } => self
                .fly_to(x, y, strategy.unwrap_or(default_strategy))
                .map(|_| ()),
            MissionStep::FlyHome => self.fly_home().map(|_| ()),
        }
    }
}

/// Fly every step of `mission` in order
///
/// On the first failure the rest of the mission is abandoned, the vehicle is
/// landed if airborne, and the step's error is returned. An inverted
/// altitude band is refused before the first step.
pub fn run_mission<A: MotionActuator>(
    controller: &mut FlightController<A>,
    mission: &Mission,
    defaults: &MissionConfig,
) -> Result<()> {
    let band = mission.band(defaults)?;
    info!(
        "Starting mission '{}' ({} steps, floor {}cm, ceiling {}cm)",
        mission.name,
        mission.steps.len(),
        band.floor_cm,
        band.ceiling_cm
    );

    for (i, step) in mission.steps.iter().enumerate() {
        info!("Step {}/{}: {:?}", i + 1, mission.steps.len(), step);

        if let Err(e) = controller.run_step(step, &band) {
            error!("Mission '{}' aborted at step {}: {}", mission.name, i + 1, e);
            if controller.is_airborne() {
                warn!("Landing after failed step");
                if let Err(land_err) = controller.land() {
                    error!("Emergency landing failed: {}", land_err);
                }
            }
            return Err(e);
        }
    }

    let (x, y) = controller.current_position();
    info!(
        "Mission '{}' complete at ({}, {}), heading {:.0}°",
        mission.name,
        x,
        y,
        controller.current_heading()
    );
    Ok(())
}
