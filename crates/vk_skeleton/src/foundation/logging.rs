//! Logging initialization

pub use log::{debug, error, info, trace, warn};

use crate::core::config::LoggingConfig;

/// Initialize `env_logger` with the configured default level
///
/// `RUST_LOG` directives are applied on top of the configured level. Calling
/// this more than once is harmless; later calls are ignored.
pub fn init(config: &LoggingConfig) {
    let result = env_logger::Builder::new()
        .filter_level(config.level_filter())
        .parse_default_env()
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LoggingConfig::new().with_log_level("debug");
        init(&config);
        init(&config);
    }
}
