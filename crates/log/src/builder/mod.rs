//! Logger builder implementation

#[macro_use]
mod format;

use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Parse the level directive without installing anything
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Filter`] if `EnvFilter` rejects the directive.
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter(format!("{}: {e}", self.config.level)))
    }

    /// Build and install the global subscriber
    ///
    /// Output goes to stderr so stdout stays free for program output.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<()> {
        let filter = self.filter()?;
        let display = &self.config.display;

        let fmt_layer = match self.config.format {
            Format::Pretty => create_fmt_layer!(pretty, display, display.colors),
            Format::Compact => create_fmt_layer!(compact, display, display.colors),
            Format::Json => create_fmt_layer!(json, display, false),
        };

        Registry::default()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LogError::Init(e.to_string()))
    }
}
