mod cli;
mod output;

use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use flip::FlipSimulator;

use cli::Args;

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let scenario = args.scenario()?;

    if args.dump_scenario {
        let text = ron::ser::to_string_pretty(&scenario, ron::ser::PrettyConfig::default())
            .context("serializing scenario")?;
        println!("{text}");
        return Ok(());
    }

    let sim = FlipSimulator::new(&scenario.physical, &scenario.simulation)
        .context("invalid scenario")?;
    let trajectory = sim.run();

    match &args.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            output::write_csv(&mut BufWriter::new(file), &trajectory)?;
            tracing::info!(path = %path.display(), rows = trajectory.len(), "trajectory written");
        }
        None => output::write_csv(&mut BufWriter::new(io::stdout().lock()), &trajectory)?,
    }

    Ok(())
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}
