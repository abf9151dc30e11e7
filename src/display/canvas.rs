// Digit canvas - Renders intensity grids onto a raster context
//
// The render sequence is: clear the surface, rasterize the grid to one
// pixel per cell, upload it into a small scratch raster, stretch-blit the
// scratch raster over the whole surface with smoothing off, then stroke the
// grid overlay on top.

use super::context::{RasterContext, SoftwareContext, SurfaceRegistry};
use super::framebuffer::{Rect, RgbaImage};
use super::overlay::GridOverlay;
use super::raster::rasterize;
use crate::config::ConfigError;
use crate::source::{IntensityGrid, PixelSource};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while binding or rendering a canvas
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no raster surface registered as '{surface_id}'")]
    Binding { surface_id: String },

    #[error("intensity grid has {actual} samples, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid render configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Render configuration
///
/// Fixed for the lifetime of a canvas; a different size means a new canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Logical cells per side
    pub grid_size: usize,
    /// Physical pixels per cell side
    pub cell_size: usize,
    /// Draw cell boundary lines over the digit
    pub show_grid: bool,
}

impl RenderConfig {
    /// Create a new render configuration with default values
    ///
    /// Default: 28×28 grid, 10 pixels per cell, grid shown
    pub fn new() -> Self {
        Self {
            grid_size: 28,
            cell_size: 10,
            show_grid: true,
        }
    }

    /// Set the number of cells per side (at least 1)
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size.max(1);
        self
    }

    /// Set the magnification factor (at least 1)
    pub fn with_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size.max(1);
        self
    }

    /// Show or hide the grid overlay
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    /// Surface side length in physical pixels
    pub fn surface_size(&self) -> usize {
        self.grid_size * self.cell_size
    }

    /// Number of samples an intensity grid must carry
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Reject zero sizes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Display surface for a single digit
pub struct DigitCanvas<C: RasterContext = SoftwareContext> {
    context: C,
    scratch: SoftwareContext,
    overlay: GridOverlay,
    config: RenderConfig,
}

impl<C: RasterContext> DigitCanvas<C> {
    /// Create a canvas over an acquired raster context
    ///
    /// Resizes the context to `grid_size * cell_size` on both axes and turns
    /// smoothing off.
    pub fn new(mut context: C, config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;

        let side = config.surface_size();
        context.set_size(side, side);
        context.set_smoothing(false);

        let mut scratch = SoftwareContext::new(config.grid_size, config.grid_size);
        scratch.set_smoothing(false);

        debug!(
            "Canvas bound: {}x{} cells at {}px ({}x{} surface)",
            config.grid_size, config.grid_size, config.cell_size, side, side
        );

        Ok(Self {
            context,
            scratch,
            overlay: GridOverlay::new(config.grid_size, config.cell_size),
            config,
        })
    }

    /// Create a canvas over the context registered as `surface_id`
    pub fn bind(
        registry: &mut SurfaceRegistry<C>,
        surface_id: &str,
        config: RenderConfig,
    ) -> Result<Self, RenderError> {
        let context = registry
            .acquire(surface_id)
            .ok_or_else(|| RenderError::Binding {
                surface_id: surface_id.to_string(),
            })?;
        Self::new(context, config)
    }

    /// Render an intensity grid
    ///
    /// Fails without touching the surface if the grid does not hold exactly
    /// `grid_size²` samples.
    pub fn display_digit(&mut self, grid: &IntensityGrid) -> Result<(), RenderError> {
        let expected = self.config.cell_count();
        if grid.len() != expected {
            return Err(RenderError::DimensionMismatch {
                expected,
                actual: grid.len(),
            });
        }

        let full = self.full_rect();
        self.context.clear_rect(full);

        let small = rasterize(grid, self.config.grid_size);
        self.scratch.put_image_data(&small, 0, 0);
        self.context.draw_image_scaled(self.scratch.pixels(), full);

        if self.config.show_grid {
            self.overlay.draw(&mut self.context);
        }

        debug!("Rendered {} cells", expected);
        Ok(())
    }

    /// Render whatever `source` currently supplies
    pub fn display_source<S: PixelSource + ?Sized>(&mut self, source: &S) -> Result<(), RenderError> {
        self.display_digit(&source.grid())
    }

    /// Reset the surface to transparent
    pub fn clear(&mut self) {
        let full = self.full_rect();
        self.context.clear_rect(full);
    }

    /// Render configuration
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The grid overlay used when `show_grid` is set
    pub fn overlay(&self) -> &GridOverlay {
        &self.overlay
    }

    /// The underlying raster context
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Current surface contents
    pub fn pixels(&self) -> &RgbaImage {
        self.context.pixels()
    }

    /// Release the raster context
    pub fn into_context(self) -> C {
        self.context
    }

    fn full_rect(&self) -> Rect {
        let side = self.config.surface_size();
        Rect::new(0, 0, side, side)
    }
}
