//! The command that is polled and the condition applied to its output

use std::io;
use std::process::Stdio;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::trace;

/// What one run of the command produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutput {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
    /// Stdout, lossily decoded, trailing whitespace removed
    pub stdout: String,
}

impl ProbeOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// When to stop polling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    ExitSuccess,
    StdoutContains(String),
    StdoutEquals(String),
}

impl Condition {
    pub fn is_met(&self, output: &ProbeOutput) -> bool {
        match self {
            Self::ExitSuccess => output.success(),
            Self::StdoutContains(text) => output.stdout.contains(text.as_str()),
            Self::StdoutEquals(text) => output.stdout == *text,
        }
    }
}

/// Command run once per attempt
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    pub fn new(command: &[String]) -> anyhow::Result<Self> {
        let Some((program, args)) = command.split_first() else {
            bail!("no command given");
        };
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Run the command to completion with stdin closed.
    ///
    /// A non-zero exit is a regular output; only a failure to spawn or
    /// wait is an error.
    pub async fn run(&self) -> io::Result<ProbeOutput> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| io::Error::new(e.kind(), format!("failed to run `{}`: {e}", self.program)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        trace!(
            code = ?output.status.code(),
            stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
            "probe finished"
        );

        Ok(ProbeOutput {
            code: output.status.code(),
            stdout,
        })
    }
}
