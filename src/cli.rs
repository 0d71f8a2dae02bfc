use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use flip::Scenario;

/// Simulates a water bottle flip and prints the trajectory as CSV.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Scenario file (RON); missing fields take the reference values
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Override the filling fraction, in [0, 1]
    #[arg(long)]
    pub fill: Option<f64>,

    /// Override the number of water slices
    #[arg(long)]
    pub slices: Option<usize>,

    /// Override the release angular velocity (rad/s)
    #[arg(long, allow_negative_numbers = true)]
    pub omega: Option<f64>,

    /// Override the release tilt (degrees)
    #[arg(long, allow_negative_numbers = true)]
    pub angle_deg: Option<f64>,

    /// Override the wall restitution, in [0, 1]
    #[arg(long)]
    pub restitution: Option<f64>,

    /// Override the linear drag coefficient (kg/s)
    #[arg(long)]
    pub drag: Option<f64>,

    /// Override the simulated time span (s)
    #[arg(long)]
    pub time: Option<f64>,

    /// Override the step size (s)
    #[arg(long)]
    pub dt: Option<f64>,

    /// Write the CSV here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the effective scenario as RON and exit
    #[arg(long)]
    pub dump_scenario: bool,
}

impl Args {
    /// The scenario file (or the reference flip) with command-line overrides applied.
    pub fn scenario(&self) -> Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => load_scenario(path)?,
            None => Scenario::default(),
        };

        let sim = &mut scenario.simulation;
        if let Some(fill) = self.fill {
            sim.filling_fraction = fill;
        }
        if let Some(slices) = self.slices {
            sim.slices = slices;
        }
        if let Some(omega) = self.omega {
            sim.initial_omega = omega;
        }
        if let Some(angle) = self.angle_deg {
            sim.initial_angle = angle.to_radians();
        }
        if let Some(restitution) = self.restitution {
            sim.restitution = restitution;
        }
        if let Some(drag) = self.drag {
            sim.drag = drag;
        }
        if let Some(time) = self.time {
            sim.total_time = time;
        }
        if let Some(dt) = self.dt {
            sim.dt = dt;
        }

        Ok(scenario)
    }
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario = ron::from_str(&text)
        .with_context(|| format!("parsing scenario {}", path.display()))?;
    tracing::debug!(path = %path.display(), "scenario loaded");
    Ok(scenario)
}
