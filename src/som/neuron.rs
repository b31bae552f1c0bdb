//! Neuron representation for the color map.

use crate::som::{Color, Position};
use serde::{Deserialize, Serialize};

/// A neuron in the Self-Organizing Map.
///
/// A neuron is one grid cell: its position on the map and the color it
/// currently holds. Best-match searches return a copy, so the color is the
/// value the neuron had when it won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neuron {
    /// Position on the grid.
    pub position: Position,
    /// Color held by the neuron.
    pub color: Color,
}

impl Neuron {
    /// Creates a neuron at `position` holding `color`.
    pub fn new(position: Position, color: Color) -> Self {
        Self { position, color }
    }

    /// Computes the grid distance to another position.
    #[inline]
    pub fn grid_distance(&self, other: &Position) -> f64 {
        self.position.distance(other)
    }
}
