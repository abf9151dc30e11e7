// MNIST View Library
// Digit rendering pipeline and background worker for the MNIST viewer

// Public modules
pub mod config;
pub mod display;
pub mod source;
pub mod worker;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, SourceKind};
pub use display::{
    DigitCanvas, GridOverlay, RasterContext, RenderConfig, RenderError, RgbaImage, SoftwareContext,
    SurfaceRegistry,
};
pub use source::{IntensityGrid, MnistDigit, NoiseSource, PixelSource, UniformSource};
pub use worker::{BackgroundTask, StatusMessage, TaskError, TaskListener, WorkerConfig};
