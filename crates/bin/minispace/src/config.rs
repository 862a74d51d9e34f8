//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `minispace.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use minispace_app::services::space_service::SpaceSettings;
use minispace_domain::geometry::{CanvasSize, Footprint, MAX_SIDE};
use minispace_domain::identity::IndexPolicy;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial canvas size.
    pub canvas: CanvasConfig,
    /// Device card settings.
    pub device: DeviceConfig,
    /// Resize handling.
    pub resize: ResizeConfig,
    /// Identity allocation.
    pub space: SpaceConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Width of a device card, in pixels.
    pub footprint_width: u32,
    /// Height of a device card, in pixels.
    pub footprint_height: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Quiet period before a burst of resizes triggers a relayout.
    pub debounce_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    pub index_policy: IndexPolicy,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `minispace.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("minispace.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MINISPACE_CANVAS") {
            if let Some((width, height)) = parse_dimensions(&val) {
                self.canvas.width = width;
                self.canvas.height = height;
            }
        }
        if let Ok(val) = std::env::var("MINISPACE_RESIZE_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse() {
                self.resize.debounce_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("MINISPACE_INDEX_POLICY") {
            if let Ok(policy) = val.parse() {
                self.space.index_policy = policy;
            }
        }
        if let Ok(val) = std::env::var("MINISPACE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let settings = self.space_settings();
        if !settings.canvas.is_drawable() {
            return Err(ConfigError::Validation(format!(
                "canvas dimensions must be between 1 and {MAX_SIDE}"
            )));
        }
        if !settings.footprint.is_drawable() {
            return Err(ConfigError::Validation(format!(
                "device footprint must be between 1 and {MAX_SIDE}"
            )));
        }
        Ok(())
    }

    /// Settings for the space service.
    #[must_use]
    pub fn space_settings(&self) -> SpaceSettings {
        SpaceSettings {
            canvas: CanvasSize::new(self.canvas.width, self.canvas.height),
            footprint: Footprint {
                width: self.device.footprint_width,
                height: self.device.footprint_height,
            },
            index_policy: self.space.index_policy,
            resize_debounce: Duration::from_millis(self.resize.debounce_ms),
        }
    }
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_dimensions(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.split_once(['x', 'X'])?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            footprint_width: 100,
            footprint_height: 100,
        }
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self { debounce_ms: 50 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "minispace=info,minispace_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.canvas.height, 600);
        assert_eq!(config.resize.debounce_ms, 50);
        assert_eq!(config.space.index_policy, IndexPolicy::Compacting);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.device.footprint_width, 100);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [canvas]
            width = 1280
            height = 720

            [device]
            footprint_width = 80
            footprint_height = 120

            [resize]
            debounce_ms = 200

            [space]
            index_policy = 'monotonic'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.canvas.width, 1280);
        assert_eq!(config.canvas.height, 720);
        assert_eq!(config.device.footprint_height, 120);
        assert_eq!(config.resize.debounce_ms, 200);
        assert_eq!(config.space.index_policy, IndexPolicy::Monotonic);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.canvas.width, 800);
    }

    #[test]
    fn should_reject_zero_canvas() {
        let mut config = Config::default();
        config.canvas.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_footprint() {
        let mut config = Config::default();
        config.device.footprint_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_canvas_beyond_pixel_range() {
        let mut config = Config::default();
        config.canvas.width = u32::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.canvas.width = MAX_SIDE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_oversized_footprint() {
        let mut config = Config::default();
        config.device.footprint_height = MAX_SIDE + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_build_space_settings() {
        let settings = Config::default().space_settings();
        assert_eq!(settings.canvas, CanvasSize::new(800, 600));
        assert_eq!(settings.resize_debounce, Duration::from_millis(50));
    }

    #[test]
    fn should_parse_dimensions() {
        assert_eq!(parse_dimensions("1024x768"), Some((1024, 768)));
        assert_eq!(parse_dimensions("10 X 20"), Some((10, 20)));
        assert_eq!(parse_dimensions("wide"), None);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
