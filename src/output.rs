use std::io::Write;

use anyhow::Result;
use flip::Trajectory;

pub const HEADER: &str = "time,angle,omega,center_of_mass,inertia";

/// One row per snapshot, full f64 precision.
pub fn write_csv(out: &mut impl Write, trajectory: &Trajectory) -> Result<()> {
    writeln!(out, "{HEADER}")?;
    for s in trajectory {
        writeln!(
            out,
            "{},{},{},{},{}",
            s.time, s.angle, s.omega, s.center_of_mass, s.inertia
        )?;
    }
    out.flush()?;
    Ok(())
}
