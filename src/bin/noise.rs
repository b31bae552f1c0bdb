//! Writes a square image of uniform random RGB noise.

use clap::Parser;
use log::error;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use somcolor::{noise, raster, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "noise")]
#[command(version)]
#[command(about = "Generate a square image of uniform random colors", long_about = None)]
struct Cli {
    /// Side length in pixels
    size: usize,

    /// Output image; the format follows the extension
    output: PathBuf,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let grid = noise::generate_noise(cli.size, &mut rng)?;
    raster::save_grid(&grid, &cli.output)?;
    println!("✓ Wrote {}x{} noise image to {}", cli.size, cli.size, cli.output.display());
    Ok(())
}
