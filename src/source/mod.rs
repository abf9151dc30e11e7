// Pixel sources - Supply intensity grids for the renderer
//
// This module provides:
// - IntensityGrid: a flat row-major sequence of 0-255 ink intensities
// - PixelSource: the supplier interface used by the viewer
// - The bundled MNIST digit, a uniform fill and a seeded noise source

pub mod digit;
pub mod noise;

pub use digit::{MnistDigit, MNIST_DIGIT_8, MNIST_SIZE};
pub use noise::NoiseSource;

/// Row-major grid of ink intensities, origin at the top-left corner
///
/// Samples are stored as bytes. Constructors taking wider values clamp them
/// into 0-255; the length is validated by the renderer against its grid size.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntensityGrid {
    samples: Vec<u8>,
}

impl IntensityGrid {
    /// Create a grid from raw byte samples
    pub fn new(samples: Vec<u8>) -> Self {
        Self { samples }
    }

    /// Create a grid of `len` samples all set to `intensity`
    pub fn filled(len: usize, intensity: u8) -> Self {
        Self {
            samples: vec![intensity; len],
        }
    }

    /// Create a grid from integer samples, clamping each into 0-255
    pub fn from_clamped<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let samples = values
            .into_iter()
            .map(|v| v.clamp(0, 255) as u8)
            .collect();
        Self { samples }
    }

    /// Create a grid from floating point samples
    ///
    /// Each value is rounded, then clamped into 0-255. NaN maps to 0.
    pub fn from_f64_clamped(values: &[f64]) -> Self {
        let samples = values
            .iter()
            .map(|&v| if v.is_nan() { 0 } else { v.round().clamp(0.0, 255.0) as u8 })
            .collect();
        Self { samples }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the grid holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Side length if the sample count is a perfect square
    pub fn side(&self) -> Option<usize> {
        let len = self.samples.len();
        let side = (len as f64).sqrt().round() as usize;
        (side * side == len).then_some(side)
    }

    /// Raw samples
    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    /// Sample at (row, col) for a grid of the given side length
    pub fn get(&self, row: usize, col: usize, side: usize) -> Option<u8> {
        if row >= side || col >= side {
            return None;
        }
        self.samples.get(row * side + col).copied()
    }
}

impl From<Vec<u8>> for IntensityGrid {
    fn from(samples: Vec<u8>) -> Self {
        Self::new(samples)
    }
}

impl From<&[u8]> for IntensityGrid {
    fn from(samples: &[u8]) -> Self {
        Self::new(samples.to_vec())
    }
}

/// Supplier of intensity grids
pub trait PixelSource {
    /// Produce the grid to display
    fn grid(&self) -> IntensityGrid;
}

impl<F> PixelSource for F
where
    F: Fn() -> IntensityGrid,
{
    fn grid(&self) -> IntensityGrid {
        self()
    }
}

/// Pixel source filling every cell with one intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSource {
    /// Cells per side
    pub grid_size: usize,
    /// Intensity of every cell
    pub intensity: u8,
}

impl UniformSource {
    pub fn new(grid_size: usize, intensity: u8) -> Self {
        Self {
            grid_size,
            intensity,
        }
    }
}

impl PixelSource for UniformSource {
    fn grid(&self) -> IntensityGrid {
        IntensityGrid::filled(self.grid_size * self.grid_size, self.intensity)
    }
}
