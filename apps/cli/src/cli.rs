//! Command-line flags

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use watchpost_log::Format;

use crate::probe::Condition;

/// Run a command until its output meets a condition.
///
/// The command runs once per attempt, after waiting the poll interval.
/// Exit status: 0 when the condition was met, 1 when attempts ran out,
/// 130 when interrupted, 2 on any other error.
#[derive(Debug, Parser)]
#[command(name = "watchpost", version, about, long_about = None)]
pub struct Cli {
    /// Maximum number of times the command runs
    #[arg(short = 'n', long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Delay before each attempt, e.g. `500ms`, `2s`, `1m`
    #[arg(short, long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Stop once the command exits with status 0 (default)
    #[arg(long, group = "until")]
    pub until_success: bool,

    /// Stop once stdout contains TEXT
    #[arg(long, value_name = "TEXT", group = "until")]
    pub until_contains: Option<String>,

    /// Stop once stdout, minus trailing whitespace, equals TEXT
    #[arg(long, value_name = "TEXT", group = "until")]
    pub until_equals: Option<String>,

    /// TOML file with `[poll]`, `until` and `[log]` settings
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,

    /// Log filter directive, e.g. `debug` or `watchpost_poll=trace`
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<Format>,

    /// Command to run, with its arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Condition selected on the command line, if any
    pub fn condition(&self) -> Option<Condition> {
        if let Some(text) = &self.until_contains {
            Some(Condition::StdoutContains(text.clone()))
        } else if let Some(text) = &self.until_equals {
            Some(Condition::StdoutEquals(text.clone()))
        } else if self.until_success {
            Some(Condition::ExitSuccess)
        } else {
            None
        }
    }
}
