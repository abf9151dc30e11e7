// Configuration management
//
// Loads viewer settings from a TOML file. Missing files and missing keys
// fall back to defaults; nothing is ever written back.

use crate::display::RenderConfig;
use crate::source::{noise, MnistDigit, NoiseSource, PixelSource, UniformSource, MNIST_SIZE};
use crate::worker::WorkerConfig;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default configuration file path
pub const CONFIG_FILE: &str = "mnist_view.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    ZeroGridSize,

    #[error("cell size must be at least 1")]
    ZeroCellSize,

    #[error("report interval must be at least 1")]
    ZeroReportInterval,

    #[error("the bundled digit is {expected}×{expected}, but grid size is {actual}")]
    DigitGridSize { expected: usize, actual: usize },

    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which pixel source the viewer displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceKind {
    /// The bundled MNIST "8"
    #[default]
    Digit,
    /// Seeded Gaussian noise
    Noise {
        #[serde(default = "default_seed")]
        seed: u64,
    },
    /// Every cell at one intensity
    Uniform { intensity: u8 },
}

fn default_seed() -> u64 {
    noise::DEFAULT_SEED
}

impl SourceKind {
    /// Build the pixel source for a grid of `grid_size` cells per side
    ///
    /// The bundled digit is always 28×28 regardless of `grid_size`.
    pub fn build(&self, grid_size: usize) -> Box<dyn PixelSource> {
        match *self {
            SourceKind::Digit => Box::new(MnistDigit),
            SourceKind::Noise { seed } => Box::new(NoiseSource::new(seed, grid_size)),
            SourceKind::Uniform { intensity } => {
                Box::new(UniformSource::new(grid_size, intensity))
            }
        }
    }
}

/// Viewer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Canvas settings
    pub render: RenderConfig,

    /// Background worker settings
    pub worker: WorkerConfig,

    /// Displayed pixel source
    pub source: SourceKind,
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults
    ///
    /// A missing file is silent; an unreadable or invalid one is logged.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!("Ignoring configuration '{}': {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate configuration from `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()?;
        self.worker.validate()?;

        if self.source == SourceKind::Digit && self.render.grid_size != MNIST_SIZE {
            return Err(ConfigError::DigitGridSize {
                expected: MNIST_SIZE,
                actual: self.render.grid_size,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.render.grid_size, 28);
        assert_eq!(config.render.cell_size, 10);
        assert!(config.render.show_grid);
        assert_eq!(config.worker.report_interval, 1000);
        assert_eq!(config.source, SourceKind::Digit);
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_toml_str(
            r#"
            [render]
            cell_size = 4

            [source]
            kind = "noise"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.render.cell_size, 4);
        assert_eq!(config.render.grid_size, 28);
        assert_eq!(config.source, SourceKind::Noise { seed: 42 });
    }

    #[test]
    fn test_uniform_source_config() {
        let config = AppConfig::from_toml_str(
            r#"
            [source]
            kind = "uniform"
            intensity = 255
            "#,
        )
        .expect("valid config");
        assert_eq!(config.source, SourceKind::Uniform { intensity: 255 });
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_toml_str("[render]\ngrid_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroGridSize));

        let err = AppConfig::from_toml_str("[worker]\nreport_interval = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroReportInterval));

        let err = AppConfig::from_toml_str("[render]\ngrid_size = \"big\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_digit_requires_mnist_grid_size() {
        let err = AppConfig::from_toml_str("[render]\ngrid_size = 16\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DigitGridSize {
                expected: 28,
                actual: 16
            }
        ));

        // Every accepted config renders
        let config = AppConfig::from_toml_str(
            "[render]\ngrid_size = 16\n\n[source]\nkind = \"noise\"\n",
        )
        .expect("noise adapts to any grid size");
        let mut canvas =
            crate::DigitCanvas::new(crate::SoftwareContext::default(), config.render)
                .expect("valid render config");
        let source = config.source.build(config.render.grid_size);
        assert!(canvas.display_source(source.as_ref()).is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_or_default("does/not/exist/mnist_view.toml");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized = AppConfig::from_toml_str(&toml_str).expect("Failed to deserialize");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_source_kind_build() {
        assert_eq!(SourceKind::Digit.build(5).grid().len(), 784);
        assert_eq!(SourceKind::Uniform { intensity: 1 }.build(5).grid().len(), 25);
        assert_eq!(SourceKind::Noise { seed: 7 }.build(5).grid().len(), 25);
    }
}
