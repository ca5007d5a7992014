//! algoverb - render and summarise a Schroeder reverb's impulse response
//!
//! Run with: cargo run -- --seconds 3 --patch hall.json

mod report;

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};

use algoverb::{analysis, SchroederPatch, DEFAULT_SAMPLE_RATE};
use report::Report;

#[derive(Parser)]
#[command(name = "algoverb", about = "Schroeder reverb impulse response report")]
struct Cli {
    /// JSON reverb patch (omit to use the natural preset)
    #[arg(short, long)]
    patch: Option<PathBuf>,

    /// Sample rate in Hz
    #[arg(short = 'r', long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Length of the rendered impulse response in seconds
    #[arg(short, long, default_value_t = 2.0)]
    seconds: f64,
}

fn load_patch(path: Option<&PathBuf>) -> EyreResult<SchroederPatch> {
    let Some(path) = path else {
        return Ok(SchroederPatch::natural());
    };

    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read patch {}", path.display()))?;
    serde_json::from_str(&text).wrap_err_with(|| format!("invalid patch {}", path.display()))
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if !(cli.seconds.is_finite() && cli.seconds > 0.0) {
        return Err(eyre!("--seconds must be positive, got {}", cli.seconds));
    }

    let patch = load_patch(cli.patch.as_ref())?;
    let mut reverb = patch
        .build(cli.sample_rate)
        .wrap_err("failed to build reverb from patch")?;

    let len = (cli.seconds * cli.sample_rate as f64).ceil() as usize;
    let response = analysis::impulse_response(&mut reverb, len);
    let report = Report::measure(&response, cli.sample_rate);

    println!("=== algoverb ===");
    println!("Sample rate: {} Hz", cli.sample_rate);
    println!("Stages: {}", reverb.size());
    println!("g1 = {}, g2 = {}", reverb.gain_1(), reverb.gain_2());
    println!();
    print!("{report}");

    Ok(())
}
