//! Self-Organizing Map (SOM) of color neurons.

use crate::config::BlendSource;
use crate::error::Result;
use crate::som::{Color, GridBuffer, Neuron, Position};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Width of the Gaussian falloff over normalized grid distance.
pub const GAUSSIAN_WIDTH: f64 = 0.15;

/// How strongly normalized time damps the update magnitude.
pub const TIME_DAMPING: f64 = 4.0;

/// A Self-Organizing Map whose neurons are colors.
///
/// The map is a square grid of neurons. Training pulls the best-matching
/// neuron and its spatial neighbors toward sampled pixel colors, so nearby
/// cells end up holding similar colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Som {
    /// The neuron colors (row-major order).
    pub weights: GridBuffer<Color>,
    /// Color each neighbor is blended from during updates.
    pub blend: BlendSource,
}

impl Som {
    /// Creates a `dimension x dimension` map with uniformly random colors.
    pub fn new_random<R: Rng>(dimension: usize, rng: &mut R) -> Result<Self> {
        let weights = GridBuffer::from_fn(dimension, |_| Color::random(rng))?;
        Ok(Self::from_weights(weights))
    }

    /// Wraps an existing weight grid.
    pub fn from_weights(weights: GridBuffer<Color>) -> Self {
        Self {
            weights,
            blend: BlendSource::default(),
        }
    }

    /// Sets the blend source used by [`Som::update_neighbors`].
    pub fn with_blend(mut self, blend: BlendSource) -> Self {
        self.blend = blend;
        self
    }

    /// Grid side length.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.weights.stride()
    }

    /// Returns the total number of neurons.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.weights.len()
    }

    /// Returns the neuron at a flat index.
    #[inline]
    pub fn neuron_at(&self, index: usize) -> Neuron {
        Neuron::new(self.weights.position_of(index), self.weights[index])
    }

    /// Consumes the map, returning its weight grid.
    pub fn into_weights(self) -> GridBuffer<Color> {
        self.weights
    }

    /// Finds the Best Matching Unit (BMU) for a sample color.
    ///
    /// Every neuron at the minimum Euclidean RGB distance is a candidate;
    /// the winner is drawn uniformly among them so that scan order does not
    /// favor low coordinates.
    pub fn best_match<R: Rng>(&self, sample: &Color, rng: &mut R) -> Neuron {
        let (_, candidates) = scan_candidates(self.weights.as_slice(), 0, sample);
        self.pick(&candidates, rng)
    }

    /// Finds the Best Matching Unit (BMU) in parallel.
    ///
    /// Rows are scanned on the rayon pool and reduced in row-major order, so
    /// the candidate list and the resulting choice match [`Som::best_match`]
    /// for the same generator state.
    pub fn best_match_parallel<R: Rng>(&self, sample: &Color, rng: &mut R) -> Neuron {
        let stride = self.weights.stride();
        let (_, candidates) = self
            .weights
            .as_slice()
            .par_chunks(stride)
            .enumerate()
            .map(|(row, cells)| scan_candidates(cells, row * stride, sample))
            .reduce(|| (u32::MAX, Vec::new()), merge_candidates);
        self.pick(&candidates, rng)
    }

    fn pick<R: Rng>(&self, candidates: &[usize], rng: &mut R) -> Neuron {
        let chosen = candidates[rng.gen_range(0..candidates.len())];
        self.neuron_at(chosen)
    }

    /// Neighborhood radius at normalized time `t`.
    ///
    /// Shrinks linearly from `base_radius / 2` to zero over training.
    #[inline]
    pub fn radius(base_radius: usize, t: f64) -> i64 {
        (base_radius as f64 * (1.0 - t) / 2.0) as i64
    }

    /// Blend weight for a neuron at normalized grid distance `d` at time `t`.
    ///
    /// Gaussian in distance, damped by `1 / (4t + 1)` over time.
    #[inline]
    pub fn influence(d: f64, t: f64) -> f64 {
        (-d * d / GAUSSIAN_WIDTH).exp() / (t * TIME_DAMPING + 1.0)
    }

    /// Pulls the neurons around `winner` toward `sample`.
    ///
    /// Every in-bounds cell of the square `[-radius, radius]^2` around the
    /// winner is rewritten; cells past the grid edge are skipped. Distance is
    /// normalized by the radius, so square corners sit beyond `d = 1`.
    /// Returns the number of neurons written.
    pub fn update_neighbors(
        &mut self,
        winner: &Neuron,
        sample: &Color,
        t: f64,
        base_radius: usize,
    ) -> usize {
        let radius = Self::radius(base_radius, t);
        if radius <= 0 {
            return 0;
        }

        let stride = self.weights.stride() as i64;
        let center = winner.position;
        let (cx, cy) = (center.x as i64, center.y as i64);
        let target = sample.to_channels();
        let mut updated = 0;

        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let (wx, wy) = (cx + dx, cy + dy);
                if wx < 0 || wy < 0 || wx >= stride || wy >= stride {
                    continue;
                }
                let at = Position::new(wx as usize, wy as usize);
                let d = winner.grid_distance(&at) / radius as f64;
                let scale = Self::influence(d, t);

                let previous = match self.blend {
                    BlendSource::Neighbor => *self.weights.get(at.x, at.y),
                    BlendSource::Winner => winner.color,
                };
                let blended = target * scale + previous.to_channels() * (1.0 - scale);
                self.weights.set(at.x, at.y, Color::from_channels(blended));
                updated += 1;
            }
        }

        updated
    }
}

/// Scans `cells` for the minimum squared distance to `sample`.
///
/// Returns that distance and the flat indices (offset by `offset`) of every
/// cell achieving it, in scan order.
fn scan_candidates(cells: &[Color], offset: usize, sample: &Color) -> (u32, Vec<usize>) {
    let mut best = u32::MAX;
    let mut candidates = Vec::new();

    for (i, color) in cells.iter().enumerate() {
        let d = color.distance_squared(sample);
        if d < best {
            best = d;
            candidates.clear();
            candidates.push(offset + i);
        } else if d == best {
            candidates.push(offset + i);
        }
    }

    (best, candidates)
}

/// Order-preserving merge of two partial scans.
fn merge_candidates(
    mut left: (u32, Vec<usize>),
    right: (u32, Vec<usize>),
) -> (u32, Vec<usize>) {
    if right.0 < left.0 {
        right
    } else if left.0 < right.0 {
        left
    } else {
        left.1.extend(right.1);
        left
    }
}
