//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format};

impl Config {
    /// Create configuration from environment variables
    ///
    /// - `WATCHPOST_LOG`, falling back to `RUST_LOG`, sets the filter
    /// - `WATCHPOST_LOG_FORMAT` selects `pretty`, `compact` or `json`
    /// - `NO_COLOR` disables ANSI colors
    ///
    /// Unknown formats keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("WATCHPOST_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("WATCHPOST_LOG_FORMAT") {
            config.format = format.parse().unwrap_or_default();
        }

        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.display.colors = false;
        }

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                source: true,
                ..DisplayConfig::default()
            },
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                ..DisplayConfig::default()
            },
        }
    }

    /// Quiet configuration for scripts: warnings only, no decoration
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            level: "warn".to_string(),
            format: Format::Compact,
            display: DisplayConfig {
                colors: false,
                time: false,
                target: false,
                source: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_env_is_default() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn test_watchpost_log_wins_over_rust_log() {
        let config = Config::from_lookup(lookup(&[("RUST_LOG", "warn"), ("WATCHPOST_LOG", "trace")]));
        assert_eq!(config.level, "trace");

        let config = Config::from_lookup(lookup(&[("RUST_LOG", "warn")]));
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn test_format_and_no_color() {
        let config = Config::from_lookup(lookup(&[("WATCHPOST_LOG_FORMAT", "json"), ("NO_COLOR", "1")]));
        assert_eq!(config.format, Format::Json);
        assert!(!config.display.colors);

        let config = Config::from_lookup(lookup(&[("WATCHPOST_LOG_FORMAT", "xml"), ("NO_COLOR", "")]));
        assert_eq!(config.format, Format::Compact);
        assert_eq!(config.display.colors, DisplayConfig::default().colors);
    }

    #[test]
    fn test_presets() {
        assert_eq!(Config::development().format, Format::Pretty);
        assert_eq!(Config::production().format, Format::Json);
        assert!(!Config::production().display.colors);
        assert_eq!(Config::quiet().level, "warn");
    }
}
