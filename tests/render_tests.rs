// Rendering pipeline tests
// Surface sizing, nearest-neighbor fidelity, overlay and error behavior

mod common;

use common::*;
use mnist_view::display::palette::{blend_over, BLACK, GRID_LINE_COLOR, WHITE};
use mnist_view::source::{MnistDigit, NoiseSource, UniformSource, MNIST_SIZE};
use mnist_view::*;

#[test]
fn test_surface_size_matches_config() {
    for (grid_size, cell_size) in [(28, 10), (28, 1), (5, 7), (1, 3)] {
        let config = RenderConfig::new()
            .with_grid_size(grid_size)
            .with_cell_size(cell_size);
        let mut canvas = software_canvas(config);
        canvas.display_digit(&gradient_grid(grid_size)).unwrap();

        let expected = grid_size * cell_size;
        assert_eq!(canvas.pixels().width(), expected);
        assert_eq!(canvas.pixels().height(), expected);
        assert_eq!(canvas.context().size(), (expected, expected));
    }
}

#[test]
fn test_every_pixel_matches_its_cell() {
    let config = RenderConfig::new().with_grid(false);
    let grid = MnistDigit.grid();
    let mut canvas = software_canvas(config);
    canvas.display_digit(&grid).unwrap();

    let image = canvas.pixels();
    for y in 0..image.height() {
        for x in 0..image.width() {
            assert_eq!(
                image.pixel(x, y),
                cell_color(&grid, &config, x, y),
                "pixel ({}, {})",
                x,
                y
            );
        }
    }
}

#[test]
fn test_noise_cells_do_not_bleed() {
    // Neighbouring noise cells are often 0 next to 255, the worst case for blending
    let config = RenderConfig::new().with_cell_size(6).with_grid(false);
    let grid = NoiseSource::new(7, config.grid_size).grid();
    let mut canvas = software_canvas(config);
    canvas.display_digit(&grid).unwrap();

    let image = canvas.pixels();
    for y in 0..image.height() {
        for x in 0..image.width() {
            assert_eq!(image.pixel(x, y), cell_color(&grid, &config, x, y));
        }
    }
}

#[test]
fn test_cells_match_outside_grid_lines() {
    let config = RenderConfig::new().with_grid_size(6).with_cell_size(5);
    let grid = gradient_grid(6);
    let mut canvas = software_canvas(config);
    canvas.display_digit(&grid).unwrap();

    for (x, y, color) in non_line_pixels(canvas.pixels(), &config) {
        assert_eq!(color, cell_color(&grid, &config, x, y));
    }
    for (x, y, color) in line_pixels(canvas.pixels(), &config) {
        let under = cell_color(&grid, &config, x, y);
        assert_eq!(color, blend_over(under, GRID_LINE_COLOR));
    }
}

#[test]
fn test_display_digit_is_idempotent() {
    let mut canvas = software_canvas(RenderConfig::new());
    let grid = MnistDigit.grid();

    canvas.display_digit(&grid).unwrap();
    let first = canvas.pixels().clone();
    canvas.display_digit(&grid).unwrap();

    assert_eq!(canvas.pixels(), &first);
}

#[test]
fn test_rerender_replaces_previous_digit() {
    let mut canvas = software_canvas(RenderConfig::new());
    canvas.display_source(&UniformSource::new(28, 255)).unwrap();
    canvas.display_digit(&MnistDigit.grid()).unwrap();

    let mut fresh = software_canvas(RenderConfig::new());
    fresh.display_digit(&MnistDigit.grid()).unwrap();

    assert_eq!(canvas.pixels(), fresh.pixels());
}

#[test]
fn test_dimension_mismatch() {
    let mut canvas = software_canvas(RenderConfig::new());

    for len in [0, 783, 785, 28] {
        let result = canvas.display_digit(&IntensityGrid::filled(len, 0));
        match result {
            Err(RenderError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, MNIST_SIZE * MNIST_SIZE);
                assert_eq!(actual, len);
            }
            other => panic!("expected dimension mismatch, got {:?}", other),
        }
    }

    // Nothing was drawn by the failed calls
    assert!(canvas.pixels().is_blank());
}

#[test]
fn test_clear_without_render_is_blank() {
    let mut canvas = software_canvas(RenderConfig::new());
    canvas.clear();
    assert!(canvas.pixels().is_blank());

    canvas.display_digit(&MnistDigit.grid()).unwrap();
    canvas.clear();
    assert!(canvas.pixels().is_blank());
}

#[test]
fn test_all_zero_grid_is_white_with_lines() {
    let config = RenderConfig::new().with_cell_size(10).with_grid(true);
    let mut canvas = software_canvas(config);
    canvas
        .display_digit(&IntensityGrid::filled(28 * 28, 0))
        .unwrap();

    let line = blend_over(WHITE, GRID_LINE_COLOR);
    assert!(non_line_pixels(canvas.pixels(), &config).all(|(_, _, c)| c == WHITE));
    assert!(line_pixels(canvas.pixels(), &config).all(|(_, _, c)| c == line));
}

#[test]
fn test_all_full_grid_is_black_with_lines() {
    let config = RenderConfig::new().with_cell_size(10).with_grid(true);
    let mut canvas = software_canvas(config);
    canvas
        .display_digit(&IntensityGrid::filled(28 * 28, 255))
        .unwrap();

    let line = blend_over(BLACK, GRID_LINE_COLOR);
    assert!(non_line_pixels(canvas.pixels(), &config).all(|(_, _, c)| c == BLACK));
    assert!(line_pixels(canvas.pixels(), &config).all(|(_, _, c)| c == line));
}

#[test]
fn test_grid_lines_absent_when_disabled() {
    let config = RenderConfig::new().with_grid(false);
    let mut canvas = software_canvas(config);
    canvas
        .display_digit(&IntensityGrid::filled(28 * 28, 0))
        .unwrap();

    assert!(canvas.pixels().pixels().all(|c| c == WHITE));
}

#[test]
fn test_bind_by_surface_id() {
    let mut registry: SurfaceRegistry = SurfaceRegistry::new();
    registry.register("canvas1", SoftwareContext::default());

    let missing = DigitCanvas::bind(&mut registry, "missing", RenderConfig::new());
    assert!(matches!(missing, Err(RenderError::Binding { .. })));

    let mut canvas = DigitCanvas::bind(&mut registry, "canvas1", RenderConfig::new()).unwrap();
    canvas.display_source(&MnistDigit).unwrap();
    assert!(!canvas.pixels().is_blank());

    // The surface now belongs to the canvas
    assert!(!registry.contains("canvas1"));
}

#[test]
fn test_context_returned_with_rendered_digit() {
    let config = RenderConfig::new().with_grid_size(2).with_cell_size(2).with_grid(false);
    let mut canvas = software_canvas(config);
    canvas
        .display_digit(&IntensityGrid::new(vec![0, 255, 255, 0]))
        .unwrap();

    let context = canvas.into_context();
    assert_eq!(context.pixels().pixel(0, 0), WHITE);
    assert_eq!(context.pixels().pixel(3, 0), BLACK);
    assert_eq!(context.pixels().pixel(0, 3), BLACK);
    assert_eq!(context.pixels().pixel(3, 3), WHITE);
}
