//! hamsim - encode text with a Hamming code, disturb it and decode it again

use anyhow::Result;
use clap::Parser;
use tracing::info;

use hamcode_tools::common::init_logging;
use hamcode_tools::report::{render_json, render_text};
use hamcode_tools::{GlobalConfig, InputSource, SimArgs, SimConfig, Simulator};

/// Hamming code noisy channel simulator
#[derive(Parser)]
#[command(name = "hamsim")]
#[command(about = "Encode text with a Hamming code, inject bit errors and decode it")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalConfig,

    #[command(flatten)]
    sim: SimArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let config = SimConfig::from_args(&cli.sim)?;
    info!("Simulating with {:?}", config);

    let text = InputSource::from_config(&config).load()?;
    let mut simulator = Simulator::new(&config)?;
    let report = simulator.run(&text)?;

    if config.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}
