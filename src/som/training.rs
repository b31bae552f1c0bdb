//! SOM training loop.
//!
//! Each step samples one pixel from the source image, finds its best-matching
//! neuron and pulls that neuron's neighborhood toward the sample. Normalized
//! time runs from 0 toward 1 over a fixed number of steps and controls both
//! the neighborhood radius and the update strength.

use crate::config::SomConfig;
use crate::error::{Result, SomColorError};
use crate::som::{Color, GridBuffer, Som};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Counters gathered over one training run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingStats {
    /// Number of sample/match/update steps performed.
    pub steps: usize,
    /// Total neuron writes across all steps.
    pub neurons_updated: usize,
    /// Number of steps whose neighborhood radius was still positive.
    pub active_steps: usize,
}

/// SOM trainer with a single seeded random generator.
///
/// The generator feeds map initialization, pixel sampling and best-match
/// tie-breaking, in that order, so a fixed seed reproduces a run exactly.
pub struct SomTrainer {
    config: SomConfig,
    rng: ChaCha8Rng,
}

impl SomTrainer {
    /// Creates a new trainer with the given configuration.
    pub fn new(config: SomConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self { config, rng }
    }

    /// The trainer's configuration.
    pub fn config(&self) -> &SomConfig {
        &self.config
    }

    /// Normalized time at a given step.
    #[inline]
    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 / self.config.iterations as f64
    }

    /// Creates a randomly initialized map from the trainer's generator.
    pub fn init_map(&mut self, dimension: usize) -> Result<Som> {
        let som = Som::new_random(dimension, &mut self.rng)?.with_blend(self.config.blend);
        debug!(
            "Initialized {}x{} map ({} neurons)",
            dimension,
            dimension,
            som.total_neurons()
        );
        Ok(som)
    }

    /// Initializes a map matching `source` and trains it.
    pub fn run(&mut self, source: &GridBuffer<Color>) -> Result<Som> {
        let mut som = self.init_map(source.stride())?;
        self.train(&mut som, source)?;
        Ok(som)
    }

    /// Trains `som` on pixels sampled from `source`.
    pub fn train(&mut self, som: &mut Som, source: &GridBuffer<Color>) -> Result<TrainingStats> {
        self.train_with_progress(som, source, |_, _, _, _| {})
    }

    /// Trains `som` on pixels sampled from `source`, reporting each step.
    ///
    /// `progress` receives `(step, total_steps, t, radius)` after every step.
    pub fn train_with_progress<F>(
        &mut self,
        som: &mut Som,
        source: &GridBuffer<Color>,
        mut progress: F,
    ) -> Result<TrainingStats>
    where
        F: FnMut(usize, usize, f64, i64),
    {
        self.config.validate()?;
        if source.stride() != som.dimension() {
            return Err(SomColorError::Config(format!(
                "source is {}x{} but the map is {}x{}",
                source.stride(),
                source.stride(),
                som.dimension(),
                som.dimension()
            )));
        }

        let iterations = self.config.iterations;
        let base_radius = self.config.base_radius_for(source.stride());
        let parallel = self.config.parallel_search;
        let mut stats = TrainingStats::default();

        info!(
            "Starting SOM training: {}x{} map, {} iterations, base radius {}",
            som.dimension(),
            som.dimension(),
            iterations,
            base_radius
        );

        for step in 0..iterations {
            let t = self.time_at(step);
            let sample = *source.sample_random(&mut self.rng);
            let winner = if parallel {
                som.best_match_parallel(&sample, &mut self.rng)
            } else {
                som.best_match(&sample, &mut self.rng)
            };
            let updated = som.update_neighbors(&winner, &sample, t, base_radius);

            stats.steps += 1;
            stats.neurons_updated += updated;
            if updated > 0 {
                stats.active_steps += 1;
            }

            let radius = Som::radius(base_radius, t);
            if is_log_step(step, iterations, self.config.log_interval) {
                info!("Step {}/{}: t={:.4}, radius={}", step, iterations, t, radius);
            }
            progress(step, iterations, t, radius);
        }

        info!(
            "SOM training completed: {} steps, {} neuron updates",
            stats.steps, stats.neurons_updated
        );
        Ok(stats)
    }
}

/// True for steps that get a progress log line: every `interval` steps and the last one.
#[inline]
fn is_log_step(step: usize, iterations: usize, interval: usize) -> bool {
    step % interval == 0 || step + 1 == iterations
}
