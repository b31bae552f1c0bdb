//! Self-Organizing Map (SOM) module for color quantization.
//!
//! - **Colors**: RGB values and three-channel blend arithmetic (color.rs)
//! - **Grid**: square row-major storage with 2D addressing (grid.rs)
//! - **Map**: best-match search and neighborhood updates (map.rs)
//! - **Training**: the seeded sample/match/update loop (training.rs)

mod color;
mod grid;
mod map;
mod neuron;
pub mod training;

pub use color::{Channels, Color};
pub use grid::{GridBuffer, Position};
pub use map::{Som, GAUSSIAN_WIDTH, TIME_DAMPING};
pub use neuron::Neuron;
pub use training::{SomTrainer, TrainingStats};
