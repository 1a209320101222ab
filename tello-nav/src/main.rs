//! tello-nav - fly a scripted mission with dead-reckoning tracking
//!
//! Usage:
//!   tello-nav [config.toml] [--mission square.toml] [--simulate]
//!
//! Without a config argument, `tello-nav.toml` in the working directory is
//! used if present, otherwise the built-in defaults (simulator).

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use tello_io::devices::create_actuator;
use tello_nav::{FlightController, Mission, NavConfig, NavError, Result, SessionLog, run_mission};

/// Scripted Tello flights with dead-reckoning position tracking
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    config: Option<PathBuf>,

    /// Mission file (overrides `[mission] file` in the config)
    #[arg(short, long)]
    mission: Option<PathBuf>,

    /// Fly the simulator regardless of the configured device
    #[arg(long)]
    simulate: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => NavConfig::load(path)?,
        None if Path::new("tello-nav.toml").exists() => {
            NavConfig::load(Path::new("tello-nav.toml"))?
        }
        None => NavConfig::default(),
    };
    if args.simulate {
        config.device.device_type = "simulator".to_string();
    }

    let log = SessionLog::start(&config.logging)?;
    info!("TelloNav v{}", env!("CARGO_PKG_VERSION"));

    let result = run(&config, args.mission.as_deref());
    if let Err(e) = &result {
        error!("Session failed: {}", e);
    }

    log.finish()?;
    result
}

fn run(config: &NavConfig, mission_override: Option<&Path>) -> Result<()> {
    let mission_path = mission_override
        .or(config.mission.file.as_deref())
        .ok_or_else(|| NavError::Config("No mission file given".to_string()))?;
    info!("Loading mission from {:?}", mission_path);
    let mission = Mission::load(mission_path)?;

    info!("Device: {}", config.device.device_type);
    let actuator = create_actuator(&config.device)?;
    let mut controller = FlightController::connect(actuator, config.flight.clone())?;

    match controller.battery() {
        Ok(level) => info!("Battery: {}%", level),
        Err(e) => warn!("Battery query failed: {}", e),
    }
    if let Some(tether_cm) = config.flight.tether_cm {
        info!("Tether: {}cm from takeoff point", tether_cm);
    }

    let outcome = run_mission(&mut controller, &mission, &config.mission);

    let (x, y) = controller.current_position();
    info!(
        "Final dead-reckoned state: ({}, {}) cm, heading {:.0}°, {} cm from origin",
        x,
        y,
        controller.current_heading(),
        controller.hypotenuse()
    );

    controller.disconnect()?;
    outcome
}
