//! Configuration for the somcolor training engine.

use crate::error::{Result, SomColorError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of training steps.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Which color a neighbor is blended from during a neighborhood update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendSource {
    /// Each neuron blends the sample into its own previous color.
    #[default]
    Neighbor,
    /// Every neuron in the neighborhood is rewritten from the winner's
    /// pre-update color.
    Winner,
}

/// Self-Organizing Map training configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SomConfig {
    /// Number of training steps.
    /// Default: 1000.
    pub iterations: usize,

    /// Base neighborhood radius.
    /// Default: None (the source image side length).
    pub base_radius: Option<usize>,

    /// Random seed for reproducibility.
    /// Default: None (random).
    pub seed: Option<u64>,

    /// Scan for the best match on the rayon thread pool.
    /// Default: false.
    pub parallel_search: bool,

    /// Color each neighbor is blended from.
    /// Default: neighbor.
    pub blend: BlendSource,

    /// Emit a progress log line every this many steps.
    /// Default: 100.
    pub log_interval: usize,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            base_radius: None,
            seed: None,
            parallel_search: false,
            blend: BlendSource::Neighbor,
            log_interval: 100,
        }
    }
}

impl SomConfig {
    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable for training.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(SomColorError::Config(
                "iterations must be greater than zero".to_string(),
            ));
        }
        if self.base_radius == Some(0) {
            return Err(SomColorError::Config(
                "base radius must be a positive integer".to_string(),
            ));
        }
        if self.log_interval == 0 {
            return Err(SomColorError::Config(
                "log interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the base radius to use for a source image of the given side length.
    #[inline]
    pub fn base_radius_for(&self, side: usize) -> usize {
        self.base_radius.unwrap_or(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SomConfig::default();
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.base_radius, None);
        assert_eq!(config.blend, BlendSource::Neighbor);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_radius_defaults_to_side() {
        let mut config = SomConfig::default();
        assert_eq!(config.base_radius_for(32), 32);
        config.base_radius = Some(5);
        assert_eq!(config.base_radius_for(32), 5);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = SomConfig {
            iterations: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SomColorError::Config(_))));

        let config = SomConfig {
            base_radius: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SomColorError::Config(_))));
    }

    #[test]
    fn test_from_file_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("som.json");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"{{ "iterations": 250, "seed": 9, "blend": "winner" }}"#).unwrap();

        let config = SomConfig::from_file(&path).unwrap();
        assert_eq!(config.iterations, 250);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.blend, BlendSource::Winner);
        assert_eq!(config.log_interval, 100);
    }

    #[test]
    fn test_from_file_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ iterations: ").unwrap();

        assert!(matches!(
            SomConfig::from_file(&path),
            Err(SomColorError::Serialization(_))
        ));
    }
}
