//! Final report and process exit status

use std::fmt;
use std::process::ExitCode;
use std::time::Duration;

use serde::Serialize;
use watchpost_poll::{PollOutcome, PollResult};

use crate::probe::ProbeOutput;

/// Exit code for an interrupted run, as shells report SIGINT
const EXIT_CANCELLED: u8 = 130;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub outcome: PollOutcome,
    pub attempts: u32,
    pub elapsed_ms: u64,
    /// Exit code of the last kept output
    pub exit_code: Option<i32>,
    /// Stdout of the last kept output
    pub stdout: Option<String>,
}

impl Report {
    pub fn new(result: &PollResult<ProbeOutput>) -> Self {
        let last = result.last_seen();
        Self {
            outcome: result.outcome(),
            attempts: result.attempts(),
            elapsed_ms: result.elapsed().as_millis() as u64,
            exit_code: last.and_then(|out| out.code),
            stdout: last.map(|out| out.stdout.clone()),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.outcome {
            PollOutcome::Matched => ExitCode::SUCCESS,
            PollOutcome::Exhausted => ExitCode::FAILURE,
            PollOutcome::Cancelled => ExitCode::from(EXIT_CANCELLED),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.attempts == 1 { "attempt" } else { "attempts" };
        let elapsed = humantime::format_duration(Duration::from_millis(self.elapsed_ms));
        write!(f, "{} after {} {noun} in {elapsed}", self.outcome, self.attempts)
    }
}
