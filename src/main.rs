//! somcolor CLI - Self-Organizing Map image recoloring
//!
//! Trains a color map on an input image and writes the trained map as an image.

use clap::{Parser, ValueEnum};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::error;
use somcolor::{raster, BlendSource, Result, SomConfig, SomTrainer};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "somcolor")]
#[command(version)]
#[command(about = "Recolor a square image with a self-organizing color map", long_about = None)]
struct Cli {
    /// Input image (must be square)
    input: PathBuf,

    /// Output image; the format follows the extension
    output: PathBuf,

    /// JSON training configuration; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of training iterations (default: 1000)
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Base neighborhood radius (default: image side length)
    #[arg(short, long)]
    radius: Option<usize>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Scan for best matches on all cores
    #[arg(short, long)]
    parallel: bool,

    /// Color each neighbor is blended from
    #[arg(short, long, value_enum)]
    blend: Option<BlendArg>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BlendArg {
    /// Each neuron blends from its own previous color
    Neighbor,
    /// Neighbors are rewritten from the winner's color
    Winner,
}

impl From<BlendArg> for BlendSource {
    fn from(arg: BlendArg) -> Self {
        match arg {
            BlendArg::Neighbor => BlendSource::Neighbor,
            BlendArg::Winner => BlendSource::Winner,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(e) = recolor(cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<SomConfig> {
    let mut config = match &cli.config {
        Some(path) => SomConfig::from_file(path)?,
        None => SomConfig::default(),
    };

    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    if cli.radius.is_some() {
        config.base_radius = cli.radius;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.parallel {
        config.parallel_search = true;
    }
    if let Some(blend) = cli.blend {
        config.blend = blend.into();
    }

    config.validate()?;
    Ok(config)
}

fn recolor(cli: Cli) -> Result<()> {
    let start_time = Instant::now();
    let config = build_config(&cli)?;

    println!("somcolor - Self-Organizing Map recoloring");
    println!("   Input: {}", cli.input.display());
    println!();

    // Step 1: Load image
    let source = raster::load_square_image(&cli.input)?;
    let dimension = source.stride();
    println!("✓ Loaded {}x{} image", dimension, dimension);

    // Step 2: Initialize map
    let iterations = config.iterations;
    let base_radius = config.base_radius_for(dimension);
    let mut trainer = SomTrainer::new(config);
    let mut som = trainer.init_map(dimension)?;
    println!(
        "✓ Initialized map ({}x{} = {} neurons, base radius {})",
        dimension,
        dimension,
        som.total_neurons(),
        base_radius
    );

    // Step 3: Train
    let bar_style = ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
        .unwrap()
        .progress_chars("█▓▒░  ");

    let pb = ProgressBar::new(iterations as u64);
    pb.set_style(bar_style);

    let stats = trainer.train_with_progress(&mut som, &source, |_, _, t, radius| {
        pb.set_message(format!("Training (t={:.3}, radius={})", t, radius));
        pb.inc(1);
    })?;

    pb.finish_and_clear();
    println!(
        "✓ Trained for {} steps ({} neuron updates)",
        stats.steps, stats.neurons_updated
    );

    // Step 4: Save
    raster::save_grid(&som.weights, &cli.output)?;
    println!("✓ Saved image to {}", cli.output.display());

    println!();
    println!("Done in {}", HumanDuration(start_time.elapsed()));

    Ok(())
}
