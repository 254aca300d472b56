//! Provides utilities to initialize logging.
use std::env;

use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Environment variable name for the service label, which is appended to the
/// whoami string.
pub const SVC_LABEL_ENVVAR: &str = "PLASMA_SVC_LABEL";

/// Configuration for the logger.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// The whoami string, which is used to identify the service in logs.
    whoami: String,

    /// Whether to print the source file of every event.
    with_file: bool,

    /// Whether to print the source line of every event.
    with_line_number: bool,
}

impl LoggerConfig {
    /// Creates a new instance with whoami set and source locations taken from the environment.
    pub fn new(whoami: String) -> Self {
        Self {
            whoami,
            with_file: env_flag("LOG_FILE"),
            with_line_number: env_flag("LOG_LINE_NUM"),
        }
    }

    /// Creates a new instance with the whoami string set to the provided
    /// string.
    pub fn with_base_name(s: &str) -> Self {
        Self::new(get_whoami_string(s))
    }

    /// Returns the whoami string.
    pub fn whoami(&self) -> &str {
        &self.whoami
    }

    /// Overrides whether source files are printed.
    pub const fn set_with_file(mut self, enabled: bool) -> Self {
        self.with_file = enabled;
        self
    }

    /// Overrides whether source line numbers are printed.
    pub const fn set_with_line_number(mut self, enabled: bool) -> Self {
        self.with_line_number = enabled;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::with_base_name("(plasma-exit-game)")
    }
}

/// Initializes the logging subsystem with the provided config.
///
/// Returns `false` if a global subscriber was already installed, in which case the existing one is
/// left in place. This makes it safe to call from every test.
pub fn init(config: LoggerConfig) -> bool {
    let filt = tracing_subscriber::EnvFilter::from_default_env();

    let stdout_sub = tracing_subscriber::fmt::layer()
        .compact()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_file(config.with_file)
                .with_line_number(config.with_line_number),
        )
        .with_filter(filt);

    let installed = tracing_subscriber::registry()
        .with(stdout_sub)
        .try_init()
        .is_ok();

    if installed {
        info!(whoami = %config.whoami, "logging started");
    }

    installed
}

/// Gets the service label from the standard envvar, which should be included
/// in the whoami string.
pub fn get_service_label_from_env() -> Option<String> {
    env::var(SVC_LABEL_ENVVAR).ok()
}

/// Computes a standard whoami string.
pub fn get_whoami_string(base: &str) -> String {
    match get_service_label_from_env() {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|v| v == "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let config = LoggerConfig::new("(test)".to_owned());

        // Only the first call can install the subscriber; later calls must not panic.
        let _ = init(config.clone());
        assert!(!init(config));
    }

    #[test]
    fn overrides_source_locations() {
        let config = LoggerConfig::new("(test)".to_owned())
            .set_with_file(true)
            .set_with_line_number(false);

        assert!(config.with_file);
        assert!(!config.with_line_number);
        assert_eq!(config.whoami(), "(test)");
    }
}
