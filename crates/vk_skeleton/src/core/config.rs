//! # Application Configuration
//!
//! Static configuration for the lifecycle skeleton: the window the controller
//! requests and the logging defaults the binary starts with.
//!
//! All types implement [`Config`] so they can be stored as TOML or RON, but the
//! skeleton itself only ever runs with the compiled-in defaults.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Title used by the base-code chapter
pub const DEFAULT_TITLE: &str = "Ch00BaseCode";
/// Default window width in pixels
pub const DEFAULT_WIDTH: u32 = 800;
/// Default window height in pixels
pub const DEFAULT_HEIGHT: u32 = 600;

/// # Window Configuration
///
/// Size and title of the single window owned by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl WindowConfig {
    /// Create a new non-resizable window configuration
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            resizable: false,
        }
    }

    /// Set window title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set window size
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Window size must be positive, got {}x{}",
                self.width, self.height
            ));
        }

        if self.title.is_empty() {
            return Err("Window title cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Config for WindowConfig {}

/// # Logging Configuration
///
/// Default filter for `env_logger`. `RUST_LOG` still takes precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level name (`error`, `warn`, `info`, `debug`, `trace`, `off`)
    pub log_level: String,
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }

    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Parsed level filter, falling back to `Info` for unknown names
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for LoggingConfig {}

/// # Complete Application Configuration
///
/// Top-level configuration handed to the binary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Window configuration
    pub window: WindowConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ApplicationConfig {
    /// Create a configuration for a window with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            window: WindowConfig::default().with_title(title),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate the entire configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        self.window.validate()
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_window_defaults() {
        let config = WindowConfig::default();

        assert_eq!(config.title, "Ch00BaseCode");
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert!(!config.resizable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_window_validation() {
        assert!(WindowConfig::default().with_size(0, 600).validate().is_err());
        assert!(WindowConfig::default().with_size(800, 0).validate().is_err());
        assert!(WindowConfig::default().with_title("").validate().is_err());
        assert!(WindowConfig::new("x", 1, 1).validate().is_ok());
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(LoggingConfig::default().level_filter(), log::LevelFilter::Info);
        assert_eq!(
            LoggingConfig::new().with_log_level("DEBUG").level_filter(),
            log::LevelFilter::Debug
        );
        assert_eq!(
            LoggingConfig::new().with_log_level("chatty").level_filter(),
            log::LevelFilter::Info
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ApplicationConfig::from_str_as(
            "[window]\ntitle = \"Triangle\"\n",
            ConfigFormat::Toml,
        )
        .unwrap();

        assert_eq!(config.window.title, "Triangle");
        assert_eq!(config.window.width, DEFAULT_WIDTH);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_ron_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("vk_skeleton_config_{}.ron", std::process::id()));
        let mut config = ApplicationConfig::new("Saved");
        config.window = config.window.with_size(1024, 768);

        config.save_to_file(&path).unwrap();
        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }
}
