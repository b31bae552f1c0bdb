//! Color values and the three-channel arithmetic used to blend them.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// An RGB color with integer channels in `[0, 255]`.
///
/// Colors are both the training samples read from the source image and the
/// mutable state of every neuron in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Creates a color from its red, green and blue channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Draws a color with each channel independently uniform in `[0, 255]`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self([rng.gen(), rng.gen(), rng.gen()])
    }

    /// Computes the squared Euclidean distance in RGB space.
    ///
    /// Exact integer arithmetic, so equal distances compare equal.
    #[inline]
    pub fn distance_squared(&self, other: &Color) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| {
                let d = a as i32 - b as i32;
                (d * d) as u32
            })
            .sum()
    }

    /// Computes the Euclidean distance in RGB space.
    #[inline]
    pub fn distance(&self, other: &Color) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Widens the color into floating-point channels.
    #[inline]
    pub fn to_channels(self) -> Channels {
        Channels(self.0.map(f64::from))
    }

    /// Truncates floating-point channels back into a color.
    ///
    /// Each channel is truncated toward zero and saturated to `[0, 255]`.
    #[inline]
    pub fn from_channels(channels: Channels) -> Self {
        Self(channels.0.map(|c| c.trunc() as u8))
    }
}

/// Three floating-point channels for intermediate color arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Channels(pub [f64; 3]);

impl Channels {
    /// Multiplies every channel by `s`.
    #[inline]
    pub fn scale(self, s: f64) -> Channels {
        Channels(self.0.map(|c| c * s))
    }
}

impl Add for Channels {
    type Output = Channels;

    /// Element-wise sum.
    fn add(self, rhs: Channels) -> Channels {
        let mut out = self.0;
        for (o, b) in out.iter_mut().zip(rhs.0) {
            *o += b;
        }
        Channels(out)
    }
}

impl Mul<f64> for Channels {
    type Output = Channels;

    fn mul(self, rhs: f64) -> Channels {
        self.scale(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_distance() {
        let a = Color::new(0, 0, 0);
        let b = Color::new(3, 4, 0);
        assert_eq!(a.distance_squared(&b), 25);
        assert!((a.distance(&b) - 5.0).abs() < 1e-10);
        assert_eq!(b.distance_squared(&a), 25);
    }

    #[test]
    fn test_distance_extremes() {
        let black = Color::new(0, 0, 0);
        let white = Color::new(255, 255, 255);
        assert_eq!(black.distance_squared(&white), 3 * 255 * 255);
        assert_eq!(white.distance_squared(&white), 0);
    }

    #[test]
    fn test_channel_ops() {
        let a = Channels([1.0, 2.0, 3.0]);
        let b = Channels([2.0, 1.0, 3.0]);
        assert_eq!(a.add(b), Channels([3.0, 3.0, 6.0]));
        assert_eq!(a.scale(2.0), Channels([2.0, 4.0, 6.0]));
        assert_eq!(a + b * 0.5, Channels([2.0, 2.5, 4.5]));
    }

    #[test]
    fn test_from_channels_truncates() {
        let c = Color::from_channels(Channels([12.99, 0.4, 254.999]));
        assert_eq!(c, Color::new(12, 0, 254));
    }

    #[test]
    fn test_random_is_seeded() {
        let mut a = ChaCha8Rng::seed_from_u64(3);
        let mut b = ChaCha8Rng::seed_from_u64(3);
        let colors_a: Vec<Color> = (0..16).map(|_| Color::random(&mut a)).collect();
        let colors_b: Vec<Color> = (0..16).map(|_| Color::random(&mut b)).collect();
        assert_eq!(colors_a, colors_b);
        assert!(colors_a.iter().any(|c| *c != colors_a[0]));
    }
}
