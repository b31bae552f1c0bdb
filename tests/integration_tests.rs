//! Integration tests for the somcolor engine.

use image::{ImageBuffer, Rgb, RgbImage};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use somcolor::{
    noise, raster, BlendSource, Color, GridBuffer, Som, SomColorError, SomConfig, SomTrainer,
};
use tempfile::tempdir;

const RED: Color = Color::new(255, 0, 0);
const GREEN: Color = Color::new(0, 255, 0);
const BLUE: Color = Color::new(0, 0, 255);
const BLACK: Color = Color::new(0, 0, 0);

/// A 2x2 source image of four saturated colors.
fn saturated_source() -> GridBuffer<Color> {
    GridBuffer::from_vec(vec![RED, GREEN, BLUE, BLACK]).unwrap()
}

/// A gradient image, saved so that it can be read back through the raster layer.
fn gradient_image(size: u32) -> RgbImage {
    ImageBuffer::from_fn(size, size, |x, y| {
        Rgb([
            (x * 255 / (size - 1)) as u8,
            (y * 255 / (size - 1)) as u8,
            128,
        ])
    })
}

/// Distance from each neuron to the closest source color.
fn distances_to_source(som: &Som, source: &GridBuffer<Color>) -> Vec<f64> {
    som.weights
        .iter()
        .map(|neuron| {
            source
                .iter()
                .map(|c| neuron.distance(c))
                .fold(f64::INFINITY, f64::min)
        })
        .collect()
}

#[test]
fn test_training_moves_neurons_toward_source_colors() {
    let source = saturated_source();

    for seed in 0..10u64 {
        let config = SomConfig {
            iterations: 1000,
            base_radius: Some(2),
            seed: Some(seed),
            ..Default::default()
        };
        let mut trainer = SomTrainer::new(config);
        let mut som = trainer.init_map(2).unwrap();
        let before = distances_to_source(&som, &source);

        let stats = trainer.train(&mut som, &source).unwrap();
        let after = distances_to_source(&som, &source);

        assert_eq!(stats.steps, 1000);
        // only t = 0 has a positive radius with base radius 2
        assert_eq!(stats.active_steps, 1);
        assert!(after.iter().sum::<f64>() < before.iter().sum::<f64>());
        assert!(som.weights.iter().any(|c| source.iter().any(|s| s == c)));
        assert!(after.iter().zip(&before).any(|(a, b)| a < b));
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let source = saturated_source();
    let config = SomConfig {
        seed: Some(123),
        base_radius: Some(2),
        ..Default::default()
    };

    let first = SomTrainer::new(config.clone()).run(&source).unwrap();
    let second = SomTrainer::new(config.clone()).run(&source).unwrap();
    assert_eq!(first.weights, second.weights);

    let other = SomTrainer::new(SomConfig {
        seed: Some(124),
        ..config
    })
    .run(&source)
    .unwrap();
    assert_ne!(first.weights, other.weights);
    assert_eq!(other.weights.stride(), 2);
}

#[test]
fn test_end_to_end_image_files() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.png");
    let output = dir.path().join("output.png");
    gradient_image(12).save(&input).unwrap();

    let source = raster::load_square_image(&input).unwrap();
    assert_eq!(source.stride(), 12);

    let config = SomConfig {
        iterations: 300,
        seed: Some(7),
        ..Default::default()
    };
    let som = SomTrainer::new(config).run(&source).unwrap();
    raster::save_grid(&som.weights, &output).unwrap();

    let written = image::open(&output).unwrap().to_rgb8();
    assert_eq!(written.dimensions(), (12, 12));

    let reloaded = raster::load_square_image(&output).unwrap();
    assert_eq!(reloaded, som.weights);
}

#[test]
fn test_parallel_and_winner_blend_end_to_end() {
    let img = gradient_image(8);
    let source = raster::image_to_grid(&img).unwrap();

    let base = SomConfig {
        iterations: 200,
        seed: Some(99),
        blend: BlendSource::Winner,
        ..Default::default()
    };
    let sequential = SomTrainer::new(base.clone()).run(&source).unwrap();
    let parallel = SomTrainer::new(SomConfig {
        parallel_search: true,
        ..base
    })
    .run(&source)
    .unwrap();

    assert_eq!(sequential.weights, parallel.weights);
    assert_eq!(sequential.blend, BlendSource::Winner);
}

#[test]
fn test_non_square_input_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("wide.png");
    let img: RgbImage = ImageBuffer::new(6, 4);
    img.save(&input).unwrap();

    let result = raster::load_square_image(&input);
    assert!(matches!(
        result,
        Err(SomColorError::NonSquareImage { width: 6, height: 4 })
    ));
}

#[test]
fn test_noise_image_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noise.png");
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    let grid = noise::generate_noise(10, &mut rng).unwrap();
    raster::save_grid(&grid, &path).unwrap();

    let loaded = raster::load_square_image(&path).unwrap();
    assert_eq!(loaded, grid);
}

#[test]
fn test_noise_image_trains() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let source = noise::generate_noise(5, &mut rng).unwrap();

    let som = SomTrainer::new(SomConfig {
        seed: Some(5),
        ..Default::default()
    })
    .run(&source)
    .unwrap();
    assert_eq!(som.total_neurons(), 25);
}
