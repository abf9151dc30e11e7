// Grid overlay - Cell boundary lines drawn over the magnified digit

use super::context::{LineSegment, RasterContext};
use super::palette::{Rgba, GRID_LINE_COLOR};

/// Uniformly spaced separator lines at logical cell boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOverlay {
    grid_size: usize,
    cell_size: usize,
    color: Rgba,
}

impl GridOverlay {
    /// Create an overlay for a `grid_size`×`grid_size` grid of `cell_size` pixel cells
    pub fn new(grid_size: usize, cell_size: usize) -> Self {
        Self {
            grid_size,
            cell_size,
            color: GRID_LINE_COLOR,
        }
    }

    /// Use a different line color
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Line color
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Boundary positions `i * cell_size` for i in 0..=grid_size
    pub fn boundaries(&self) -> impl Iterator<Item = usize> + '_ {
        (0..=self.grid_size).map(move |i| i * self.cell_size)
    }

    /// One vertical and one horizontal line per boundary, each spanning the surface
    pub fn lines(&self) -> Vec<LineSegment> {
        let extent = self.grid_size * self.cell_size;
        self.boundaries()
            .flat_map(|pos| {
                [
                    LineSegment::Vertical {
                        x: pos,
                        y_start: 0,
                        y_end: extent,
                    },
                    LineSegment::Horizontal {
                        y: pos,
                        x_start: 0,
                        x_end: extent,
                    },
                ]
            })
            .collect()
    }

    /// Stroke the grid onto a context
    pub fn draw<C: RasterContext + ?Sized>(&self, context: &mut C) {
        context.stroke_lines(&self.lines(), self.color);
    }
}
