// RGBA pixel buffer
//
// Backing storage for every raster in the pipeline: the small N×N digit
// image, the intermediate scratch raster and the magnified display surface.
// Pixels are stored row-major, 4 bytes per pixel.

use super::palette::{Rgba, TRANSPARENT};

/// Axis-aligned rectangle in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Owned RGBA image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Create an image initialized to transparent black
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    /// Wrap raw RGBA bytes
    ///
    /// Returns `None` if `data` is not exactly `width * height * 4` bytes.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * 4).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        let offset = (y * self.width + x) * 4;
        self.data[offset..offset + 4].copy_from_slice(&color);
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        let offset = (y * self.width + x) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.data[offset..offset + 4]);
        rgba
    }

    /// Fill a rectangle with one color, clipped to the image bounds
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let x_end = (rect.x + rect.width).min(self.width);
        let y_end = (rect.y + rect.height).min(self.height);
        for y in rect.y.min(y_end)..y_end {
            for x in rect.x.min(x_end)..x_end {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Reset every pixel to transparent black
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Change dimensions, discarding the contents
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width * height * 4, 0);
    }

    /// Whether every pixel is transparent black
    pub fn is_blank(&self) -> bool {
        self.pixels().all(|p| p == TRANSPARENT)
    }

    /// Iterate over pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
    }

    /// Get the raw RGBA bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable access to the raw RGBA bytes
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copy the image into an RGBA output buffer of the same dimensions
    ///
    /// # Panics
    /// Panics if output buffer is too small
    pub fn copy_to(&self, output: &mut [u8]) {
        assert!(
            output.len() >= self.data.len(),
            "Output buffer too small for RGBA copy"
        );
        output[..self.data.len()].copy_from_slice(&self.data);
    }
}
