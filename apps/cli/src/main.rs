//! `watchpost` binary: poll a command until its output meets a condition

mod cli;
mod config;
mod probe;
mod report;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use watchpost_log::LoggerBuilder;
use watchpost_poll::{LogLevel, LoggingHook, PollHooks, Poller};

use crate::cli::Cli;
use crate::config::Settings;
use crate::probe::CommandProbe;
use crate::report::Report;

const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: {e}");
                        return ExitCode::from(EXIT_ERROR);
                    }
                }
            } else {
                println!("{report}");
            }
            report.exit_code()
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<Report> {
    let settings = Settings::load(cli)?;
    LoggerBuilder::from_config(settings.log.clone()).build()?;

    let probe = CommandProbe::new(&cli.command)?;
    let token = CancellationToken::new();
    spawn_interrupt_handler(token.clone());

    debug!(
        max_attempts = settings.poll.max_attempts,
        poll_interval = ?settings.poll.poll_interval,
        until = ?settings.until,
        "starting"
    );

    let poller = Poller::new(settings.poll.with_cancellation(token))
        .with_name("watchpost")
        .with_hooks(PollHooks::new().with_hook(Arc::new(LoggingHook::new(LogLevel::Debug))));

    let until = settings.until;
    let result = poller.run(|| probe.run(), |output| until.is_met(output)).await?;

    Ok(Report::new(&result))
}

/// Cancel `token` on the first Ctrl-C; the running command is allowed to
/// finish.
fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("interrupted, stopping after the current attempt");
                token.cancel();
            }
            Err(e) => warn!(error = %e, "cannot listen for Ctrl-C"),
        }
    });
}
