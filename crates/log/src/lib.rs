//! # Watchpost Log
//!
//! Tracing subscriber setup shared by watchpost binaries.
//!
//! Libraries in the workspace only emit `tracing` events; binaries call
//! [`init`] (or build a [`Config`] explicitly) once at startup.
//!
//! ```rust,no_run
//! use watchpost_log::{Config, Format, LoggerBuilder};
//!
//! let config = Config {
//!     format: Format::Json,
//!     ..Config::from_env()
//! };
//! LoggerBuilder::from_config(config).build()?;
//! tracing::info!("ready");
//! # Ok::<(), watchpost_log::LogError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod builder;
pub mod config;
mod error;

pub use builder::LoggerBuilder;
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, LogResult};

/// Install a subscriber configured from the environment
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init() -> LogResult<()> {
    LoggerBuilder::from_config(Config::from_env()).build()
}
