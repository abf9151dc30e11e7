// Raster contexts - The drawing surface abstraction
//
// A raster context is the 2D drawing capability the canvas renders through:
// sizing, smoothing control, clearing, pixel upload, stretch-blit and line
// strokes. SoftwareContext implements it over an in-memory RgbaImage, and
// SurfaceRegistry hands contexts out by identifier.

use super::framebuffer::{Rect, RgbaImage};
use super::palette::{blend_over, Rgba};
use super::raster::{stretch_nearest, stretch_smooth};
use std::collections::HashMap;

/// One-pixel-wide axis-aligned line, end coordinate exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSegment {
    /// Row `y` from `x_start` to `x_end`
    Horizontal {
        y: usize,
        x_start: usize,
        x_end: usize,
    },
    /// Column `x` from `y_start` to `y_end`
    Vertical {
        x: usize,
        y_start: usize,
        y_end: usize,
    },
}

/// 2D drawing capability set
pub trait RasterContext {
    /// Declare the surface size; existing contents are discarded
    fn set_size(&mut self, width: usize, height: usize);

    /// Current (width, height) in physical pixels
    fn size(&self) -> (usize, usize);

    /// Enable or disable interpolation when stretching images
    fn set_smoothing(&mut self, enabled: bool);

    /// Whether stretched images are interpolated
    fn smoothing(&self) -> bool;

    /// Reset a region to transparent black
    fn clear_rect(&mut self, rect: Rect);

    /// Write an image at (x, y), replacing the covered pixels
    fn put_image_data(&mut self, image: &RgbaImage, x: usize, y: usize);

    /// Stretch-blit an image onto `dest`, composited source-over
    fn draw_image_scaled(&mut self, image: &RgbaImage, dest: Rect);

    /// Stroke a set of lines as one path in a translucent color
    ///
    /// Pixels covered by more than one line are painted once.
    fn stroke_lines(&mut self, lines: &[LineSegment], color: Rgba);

    /// Current surface contents
    fn pixels(&self) -> &RgbaImage;
}

/// In-memory raster context
///
/// Smoothing starts enabled, matching a freshly acquired 2D context.
#[derive(Debug, Clone)]
pub struct SoftwareContext {
    image: RgbaImage,
    smoothing: bool,
}

impl SoftwareContext {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            smoothing: true,
        }
    }

    /// Clamp a line coordinate onto the surface
    ///
    /// A boundary exactly one past the last pixel lands on the last pixel so
    /// the closing edge of a grid stays visible. Anything further is dropped.
    fn clamp_coord(pos: usize, len: usize) -> Option<usize> {
        match len {
            0 => None,
            _ if pos < len => Some(pos),
            _ if pos == len => Some(len - 1),
            _ => None,
        }
    }
}

impl Default for SoftwareContext {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl RasterContext for SoftwareContext {
    fn set_size(&mut self, width: usize, height: usize) {
        self.image.resize(width, height);
    }

    fn size(&self) -> (usize, usize) {
        (self.image.width(), self.image.height())
    }

    fn set_smoothing(&mut self, enabled: bool) {
        self.smoothing = enabled;
    }

    fn smoothing(&self) -> bool {
        self.smoothing
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.image.fill_rect(rect, [0, 0, 0, 0]);
    }

    fn put_image_data(&mut self, image: &RgbaImage, x: usize, y: usize) {
        let x_end = (x + image.width()).min(self.image.width());
        let y_end = (y + image.height()).min(self.image.height());
        for dy in y.min(y_end)..y_end {
            for dx in x.min(x_end)..x_end {
                self.image.set_pixel(dx, dy, image.pixel(dx - x, dy - y));
            }
        }
    }

    fn draw_image_scaled(&mut self, image: &RgbaImage, dest: Rect) {
        if self.smoothing {
            stretch_smooth(image, &mut self.image, dest);
        } else {
            stretch_nearest(image, &mut self.image, dest);
        }
    }

    fn stroke_lines(&mut self, lines: &[LineSegment], color: Rgba) {
        let (width, height) = self.size();
        let mut covered = vec![false; width * height];

        for line in lines {
            match *line {
                LineSegment::Horizontal { y, x_start, x_end } => {
                    if let Some(y) = Self::clamp_coord(y, height) {
                        for x in x_start.min(width)..x_end.min(width) {
                            covered[y * width + x] = true;
                        }
                    }
                }
                LineSegment::Vertical { x, y_start, y_end } => {
                    if let Some(x) = Self::clamp_coord(x, width) {
                        for y in y_start.min(height)..y_end.min(height) {
                            covered[y * width + x] = true;
                        }
                    }
                }
            }
        }

        for (i, _) in covered.iter().enumerate().filter(|&(_, &c)| c) {
            let (x, y) = (i % width, i / width);
            let under = self.image.pixel(x, y);
            self.image.set_pixel(x, y, blend_over(under, color));
        }
    }

    fn pixels(&self) -> &RgbaImage {
        &self.image
    }
}

/// Registry of raster contexts addressable by identifier
///
/// Acquiring a context removes it from the registry: each surface is owned
/// by exactly one canvas.
#[derive(Debug)]
pub struct SurfaceRegistry<C = SoftwareContext> {
    surfaces: HashMap<String, C>,
}

impl<C> SurfaceRegistry<C> {
    pub fn new() -> Self {
        Self {
            surfaces: HashMap::new(),
        }
    }

    /// Register a context under `id`, returning any context it replaces
    pub fn register(&mut self, id: impl Into<String>, context: C) -> Option<C> {
        self.surfaces.insert(id.into(), context)
    }

    /// Take the context registered under `id`
    pub fn acquire(&mut self, id: &str) -> Option<C> {
        self.surfaces.remove(id)
    }

    /// Whether a context is registered under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.surfaces.contains_key(id)
    }

    /// Number of registered contexts
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether no context is registered
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl<C> Default for SurfaceRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
