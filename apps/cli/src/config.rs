//! Layered settings: defaults, then TOML file, then `WATCHPOST_*` env, then flags

use std::path::Path;

use anyhow::{Context, bail};
use figment::providers::{Env, Format as _, Serialized, Toml};
use figment::value::{Dict, Map, Value};
use figment::{Figment, Metadata, Profile, Provider};
use serde::{Deserialize, Serialize};
use watchpost_log::Config as LogConfig;
use watchpost_poll::PollOptions;

use crate::cli::Cli;
use crate::probe::Condition;

/// Env prefix; nested keys are separated by `__`, e.g.
/// `WATCHPOST_POLL__MAX_ATTEMPTS=5`.
const ENV_PREFIX: &str = "WATCHPOST_";

/// Condition keys; their values are always text, see [`UntilEnv`].
const UNTIL_ENV_PREFIX: &str = "WATCHPOST_UNTIL__";

/// Everything a run needs apart from the command itself
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub poll: PollOptions,
    pub until: Condition,
    pub log: LogConfig,
}

impl Settings {
    /// Provider chain without command-line flags.
    ///
    /// Log defaults come from `WATCHPOST_LOG`, `RUST_LOG` and
    /// `WATCHPOST_LOG_FORMAT`; those two bare keys are skipped by the env
    /// layer so they never collide with the `[log]` table. Condition text
    /// from `WATCHPOST_UNTIL__*` is read by [`UntilEnv`] instead.
    pub fn figment(file: Option<&Path>) -> Figment {
        let defaults = Self {
            log: LogConfig::from_env(),
            ..Self::default()
        };

        let mut figment = Figment::from(Serialized::defaults(defaults));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        let env = Env::prefixed(ENV_PREFIX)
            .ignore(&["LOG", "LOG_FORMAT"])
            .filter(|key| !key.as_str().to_ascii_uppercase().starts_with("UNTIL__"))
            .split("__");
        figment.merge(env).merge(UntilEnv)
    }

    /// Load, apply flags and validate
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        if let Some(path) = &cli.config
            && !path.is_file()
        {
            bail!("config file {} does not exist", path.display());
        }

        let mut settings: Self = Self::figment(cli.config.as_deref())
            .extract()
            .context("invalid configuration")?;
        settings.apply_flags(cli);
        settings.poll.validate()?;

        Ok(settings)
    }

    fn apply_flags(&mut self, cli: &Cli) {
        if let Some(max_attempts) = cli.max_attempts {
            self.poll.max_attempts = max_attempts;
        }
        if let Some(interval) = cli.interval {
            self.poll.poll_interval = interval;
        }
        if let Some(condition) = cli.condition() {
            self.until = condition;
        }
        if let Some(level) = &cli.log_level {
            self.log.level.clone_from(level);
        }
        if let Some(format) = cli.log_format {
            self.log.format = format;
        }
    }
}

/// `WATCHPOST_UNTIL__<CONDITION>=<TEXT>` as `until.<condition> = "<TEXT>"`.
///
/// `Env` parses values into typed scalars, which would turn
/// `WATCHPOST_UNTIL__STDOUT_EQUALS=007` into the number 7. This provider
/// keeps the raw string.
struct UntilEnv;

impl Provider for UntilEnv {
    fn metadata(&self) -> Metadata {
        Metadata::named("`WATCHPOST_UNTIL__*` environment variable")
    }

    fn data(&self) -> figment::Result<Map<Profile, Dict>> {
        let until: Dict = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .filter_map(|(key, value)| {
                let key = key.to_ascii_uppercase();
                let condition = key.strip_prefix(UNTIL_ENV_PREFIX)?;
                Some((condition.to_ascii_lowercase(), Value::from(value)))
            })
            .collect();

        let mut dict = Dict::new();
        if !until.is_empty() {
            dict.insert("until".to_string(), Value::from(until));
        }
        Ok(Profile::Default.collect(dict))
    }
}
