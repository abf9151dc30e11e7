// Bundled sample digit
//
// A hand-drawn MNIST-style "8" on the standard 28×28 grid. Values are ink
// intensities (0 = background, 255 = full stroke).

use super::{IntensityGrid, PixelSource};

/// Side length of an MNIST image in samples
pub const MNIST_SIZE: usize = 28;

/// The bundled digit, row-major from the top-left corner
#[rustfmt::skip]
pub const MNIST_DIGIT_8: [u8; MNIST_SIZE * MNIST_SIZE] = [
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,  63, 128, 191, 224, 224, 191, 128,  63,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,  32, 159, 255, 255, 255, 255, 255, 255, 255, 255, 159,  32,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,  96, 224, 255, 255, 255, 191,  96,  96, 191, 255, 255, 255, 224,  96,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,  32, 191, 255, 255, 224,  96,   0,   0,   0,   0,  96, 224, 255, 255, 191,  32,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,  96, 255, 255, 191,  32,   0,   0,   0,   0,   0,   0,  32, 191, 255, 255,  96,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,  32, 191, 255, 224,  32,   0,   0,   0,   0,   0,   0,   0,   0,  32, 224, 255, 191,  32,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,  96, 255, 255,  96,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,  96, 255, 255,  96,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0, 128, 255, 224,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0, 224, 255, 128,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0, 159, 255, 159,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0, 159, 255, 159,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0, 191, 255, 128,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0, 128, 255, 191,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0, 191, 255, 128,   0,   0,   0,   0,   0,  32,  96,  96,  32,   0,   0,   0, 128, 255, 191,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0, 159, 255, 191,   0,   0,   0,  32, 128, 224, 255, 255, 224, 128,  32,   0, 191, 255, 159,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,  96, 255, 255,  96,   0,  96, 224, 255, 255, 255, 255, 255, 255, 224,  96, 255, 255,  96,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,  32, 224, 255, 224, 128, 255, 255, 255, 224, 128, 128, 224, 255, 255, 255, 224, 255,  32,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0, 128, 255, 255, 255, 255, 191,  32,   0,   0,   0,   0,  32, 191, 255, 255, 128,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,  32, 224, 255, 255, 128,   0,   0,   0,   0,   0,   0,   0,   0, 128, 255,  32,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,  96, 255, 255,  96,   0,   0,   0,   0,   0,   0,   0,   0,  96, 255,  96,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,  32, 191, 255, 224,  96,   0,   0,   0,   0,   0,  96, 224, 255, 191,  32,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,  32, 224, 255, 255, 224, 159, 159, 224, 255, 255, 224,  32,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,  32, 159, 255, 255, 255, 255, 255, 255, 159,  32,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,  63, 128, 191, 191, 128,  63,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
];

/// Pixel source returning the bundled MNIST "8"
#[derive(Debug, Clone, Copy, Default)]
pub struct MnistDigit;

impl PixelSource for MnistDigit {
    fn grid(&self) -> IntensityGrid {
        IntensityGrid::from(&MNIST_DIGIT_8[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_dimensions() {
        let grid = MnistDigit.grid();
        assert_eq!(grid.len(), MNIST_SIZE * MNIST_SIZE);
        assert_eq!(grid.side(), Some(MNIST_SIZE));
    }

    #[test]
    fn test_digit_border_is_blank() {
        let grid = MnistDigit.grid();
        // Top row and bottom row carry no ink
        assert!(grid.as_slice()[..MNIST_SIZE].iter().all(|&v| v == 0));
        assert!(grid.as_slice()[MNIST_SIZE * (MNIST_SIZE - 1)..]
            .iter()
            .all(|&v| v == 0));
    }

    #[test]
    fn test_digit_has_strokes() {
        let grid = MnistDigit.grid();
        let full_ink = grid.as_slice().iter().filter(|&&v| v == 255).count();
        assert!(full_ink > 50);
    }
}
