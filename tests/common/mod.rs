// Common test utilities for rendering and worker integration tests

#![allow(dead_code)]

use mnist_view::display::palette::{intensity_to_rgba, Rgba};
use mnist_view::{
    DigitCanvas, IntensityGrid, RenderConfig, RgbaImage, SoftwareContext, StatusMessage,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Maximum time to wait for background messages
pub const WORKER_TIMEOUT_SECS: u64 = 10;

/// Build a canvas over a fresh software context
pub fn software_canvas(config: RenderConfig) -> DigitCanvas {
    DigitCanvas::new(SoftwareContext::default(), config).expect("valid render config")
}

/// A grid whose intensities rise from 0 towards 255 in row-major order
pub fn gradient_grid(grid_size: usize) -> IntensityGrid {
    let len = grid_size * grid_size;
    IntensityGrid::new((0..len).map(|i| (i * 255 / len.max(1)) as u8).collect())
}

/// Whether physical coordinate `pos` lies on a grid line
///
/// Lines sit at every multiple of `cell_size`; the closing boundary is drawn
/// on the last pixel.
pub fn is_grid_line(pos: usize, config: &RenderConfig) -> bool {
    pos % config.cell_size == 0 || pos == config.surface_size() - 1
}

/// Expected color of physical pixel (x, y) without the overlay
pub fn cell_color(grid: &IntensityGrid, config: &RenderConfig, x: usize, y: usize) -> Rgba {
    let row = y / config.cell_size;
    let col = x / config.cell_size;
    intensity_to_rgba(grid.as_slice()[row * config.grid_size + col])
}

/// Every pixel that is not on a grid line, as (x, y, color)
pub fn non_line_pixels<'a>(
    image: &'a RgbaImage,
    config: &'a RenderConfig,
) -> impl Iterator<Item = (usize, usize, Rgba)> + 'a {
    (0..image.height()).flat_map(move |y| {
        (0..image.width()).filter_map(move |x| {
            if is_grid_line(x, config) || is_grid_line(y, config) {
                None
            } else {
                Some((x, y, image.pixel(x, y)))
            }
        })
    })
}

/// Every pixel that is on a grid line, as (x, y, color)
pub fn line_pixels<'a>(
    image: &'a RgbaImage,
    config: &'a RenderConfig,
) -> impl Iterator<Item = (usize, usize, Rgba)> + 'a {
    (0..image.height()).flat_map(move |y| {
        (0..image.width()).filter_map(move |x| {
            if is_grid_line(x, config) || is_grid_line(y, config) {
                Some((x, y, image.pixel(x, y)))
            } else {
                None
            }
        })
    })
}

/// Handler pushing counter values into a shared vector
pub fn counter_sink() -> (Rc<RefCell<Vec<u64>>>, impl FnMut(StatusMessage) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let handler = move |msg: StatusMessage| sink.borrow_mut().push(msg.counter);
    (seen, handler)
}
