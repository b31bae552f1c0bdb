//! Uniform random noise images.

use crate::error::{Result, SomColorError};
use crate::som::{Color, GridBuffer};
use rand::Rng;

/// Generates a `size x size` grid of independently uniform random colors.
pub fn generate_noise<R: Rng>(size: usize, rng: &mut R) -> Result<GridBuffer<Color>> {
    if size == 0 {
        return Err(SomColorError::Config("noise size must be greater than zero".to_string()));
    }
    GridBuffer::from_fn(size, |_| Color::random(rng))
}
