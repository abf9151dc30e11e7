// Display module - Renders intensity grids to a magnified surface
//
// This module provides:
// - Grayscale inversion and alpha compositing (palette)
// - RGBA image storage (framebuffer)
// - Rasterization and nearest-neighbor magnification (raster)
// - Raster contexts and the surface registry (context)
// - Grid overlay lines at cell boundaries (overlay)
// - The digit canvas tying the pipeline together (canvas)
// - Window presentation using winit + pixels (window)

pub mod canvas;
pub mod context;
pub mod framebuffer;
pub mod overlay;
pub mod palette;
pub mod raster;
pub mod window;

pub use canvas::{DigitCanvas, RenderConfig, RenderError};
pub use context::{LineSegment, RasterContext, SoftwareContext, SurfaceRegistry};
pub use framebuffer::{Rect, RgbaImage};
pub use overlay::GridOverlay;
pub use palette::{blend_over, intensity_to_rgba, Rgba, GRID_LINE_COLOR};
pub use raster::{magnify, rasterize, stretch_nearest, stretch_smooth};
pub use window::{run_viewer, ViewerWindow, MAIN_SURFACE_ID};
