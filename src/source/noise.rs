// Seeded noise source
//
// Draws standard normal samples from a seeded RNG and maps them onto the
// intensity range with `(x + 1) * 255`. Anything below -1 sigma lands on 0
// and anything above 0 saturates at 255, so the result is a speckled field
// useful for exercising the renderer with a reproducible non-digit grid.

use super::{IntensityGrid, PixelSource};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

/// Default RNG seed
pub const DEFAULT_SEED: u64 = 42;

/// Pixel source producing reproducible Gaussian noise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseSource {
    seed: u64,
    grid_size: usize,
}

impl NoiseSource {
    /// Create a noise source for a `grid_size`×`grid_size` grid
    pub fn new(seed: u64, grid_size: usize) -> Self {
        Self { seed, grid_size }
    }

    /// The seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Unclamped samples before conversion to intensities
    pub fn samples(&self) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        StandardNormal
            .sample_iter(&mut rng)
            .take(self.grid_size * self.grid_size)
            .map(|x: f64| (x + 1.0) * 255.0)
            .collect()
    }
}

impl PixelSource for NoiseSource {
    fn grid(&self) -> IntensityGrid {
        IntensityGrid::from_f64_clamped(&self.samples())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_reproducible() {
        let a = NoiseSource::new(DEFAULT_SEED, 28).grid();
        let b = NoiseSource::new(DEFAULT_SEED, 28).grid();
        assert_eq!(a, b);
        assert_eq!(a.len(), 784);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = NoiseSource::new(1, 28).grid();
        let b = NoiseSource::new(2, 28).grid();
        assert_ne!(a, b);
    }

    #[test]
    fn test_noise_saturates_both_ends() {
        let grid = NoiseSource::new(DEFAULT_SEED, 28).grid();
        let zeros = grid.as_slice().iter().filter(|&&v| v == 0).count();
        let full = grid.as_slice().iter().filter(|&&v| v == 255).count();

        // P(x < -1) ~ 16%, P(x > 0) = 50%
        assert!((50..250).contains(&zeros), "zeros = {}", zeros);
        assert!((300..480).contains(&full), "full = {}", full);
    }

    #[test]
    fn test_seed_42_sample_stream() {
        let samples = NoiseSource::new(DEFAULT_SEED, 28).samples();
        let expected = [376.885, 595.188, 201.229, 376.468];

        for (i, (&got, &want)) in samples.iter().zip(expected.iter()).enumerate() {
            assert!((got - want).abs() < 5e-3, "sample {}: {} != {}", i, got, want);
        }

        let grid = NoiseSource::new(DEFAULT_SEED, 28).grid();
        assert_eq!(&grid.as_slice()[..4], &[255, 255, 201, 255]);
    }

    #[test]
    fn test_samples_are_unclamped() {
        let samples = NoiseSource::new(DEFAULT_SEED, 28).samples();
        assert!(samples.iter().any(|&v| v < 0.0));
        assert!(samples.iter().any(|&v| v > 255.0));
    }
}
