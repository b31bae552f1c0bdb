//! # somcolor - Self-Organizing Map image recoloring
//!
//! somcolor trains a square grid of color "neurons" on the pixels of an
//! input image and emits the trained grid as a new image. The result keeps
//! the input's palette but arranges it into smooth, spatially ordered
//! regions.
//!
//! ## Overview
//!
//! Training is competitive learning on a Self-Organizing Map (SOM):
//!
//! 1. A random pixel is sampled from the source image.
//! 2. The neuron with the nearest color (Euclidean RGB distance) wins; ties
//!    are broken uniformly at random.
//! 3. Neurons in a square neighborhood around the winner are blended toward
//!    the sample with a Gaussian falloff. The neighborhood shrinks and the
//!    blend weakens as normalized time `t` runs from 0 to 1.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use somcolor::{raster, SomConfig, SomTrainer};
//! use std::path::Path;
//!
//! let source = raster::load_square_image(Path::new("input.png"))?;
//! let config = SomConfig { seed: Some(42), ..Default::default() };
//!
//! let mut trainer = SomTrainer::new(config);
//! let som = trainer.run(&source)?;
//!
//! raster::save_grid(&som.weights, Path::new("output.png"))?;
//! ```
//!
//! ## Architecture
//!
//! - [`som`] - Colors, grid storage, best-match search, neighborhood updates and training
//! - [`raster`] - Image decode/encode to and from color grids
//! - [`noise`] - Uniform random noise images
//! - [`config`] - Training configuration
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod noise;
pub mod raster;
pub mod som;

// Re-export commonly used types
pub use config::{BlendSource, SomConfig, DEFAULT_ITERATIONS};
pub use error::{Result, SomColorError};
pub use som::{Channels, Color, GridBuffer, Neuron, Position, Som, SomTrainer, TrainingStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
