//! Tracing subscriber setup.
//!
//! `RUST_LOG` is honored first; the configured level and extra directives
//! are layered on top of it.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::filter::{Directive, EnvFilter, ParseError};

/// Errors that can occur while installing the subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log directive {directive:?}: {source}")]
    InvalidDirective {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to install subscriber: {0}")]
    Install(String),
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` does not say otherwise.
    pub level: Level,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Colorize human-readable output.
    pub ansi: bool,
    /// Extra filter directives such as `trellis_layout=trace`.
    pub directives: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            ansi: true,
            directives: Vec::new(),
        }
    }
}

impl LogConfig {
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Build the filter for this configuration.
    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        let mut filter = EnvFilter::from_default_env().add_directive(self.level.into());
        for directive in &self.directives {
            let parsed: Directive =
                directive
                    .parse()
                    .map_err(|source| LoggingError::InvalidDirective {
                        directive: directive.clone(),
                        source,
                    })?;
            filter = filter.add_directive(parsed);
        }
        Ok(filter)
    }
}

/// Install the global `fmt` subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = config.filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi && !config.json);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|err| LoggingError::Install(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json);
        assert!(config.directives.is_empty());
    }

    #[test]
    fn test_filter_accepts_directives() {
        let config = LogConfig::default()
            .with_level(Level::WARN)
            .with_directive("trellis_layout=trace");
        assert!(config.filter().is_ok());
    }

    #[test]
    fn test_filter_rejects_bad_directive() {
        let config = LogConfig::default().with_directive("trellis_layout=loud");
        match config.filter() {
            Err(LoggingError::InvalidDirective { directive, .. }) => {
                assert_eq!(directive, "trellis_layout=loud");
            }
            other => panic!("expected invalid directive, got {other:?}"),
        }
    }

    #[test]
    fn test_second_install_fails() {
        let config = LogConfig::default().with_json(true);
        assert!(init_logging(&config).is_ok());
        assert!(matches!(
            init_logging(&config),
            Err(LoggingError::Install(_))
        ));
    }
}
