mod actuator;
mod command;
mod config;
mod protocol;

use clap::Parser;
use command::{CommandExecutor, CommandOutcome, SatelliteCommand};
use config::{Cli, ConsoleConfig};
use protocol::{parse_input, Input, USAGE};
use satellite_shared::{Observer, Satellite, TracingObserver};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(log_filter(std::env::var("RUST_LOG").ok()))
        .init();

    let config = ConsoleConfig::from(Cli::parse());

    let actuator = config.actuator();
    info!("Satellite console starting");
    info!("  Actuator: {}", actuator.name());
    info!(
        "  Retry: {} attempts, {:?} backoff",
        config.max_attempts, config.backoff
    );

    let observer: Arc<dyn Observer> = Arc::new(TracingObserver);
    let executor = CommandExecutor::new(actuator, observer, config.policies());
    let mut satellite = Satellite::new();

    run_command(&executor, &mut satellite, SatelliteCommand::Initialize).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    // Main command loop, one command at a time
    loop {
        stdout
            .write_all(format!("Enter command ({}): ", USAGE).as_bytes())
            .await?;
        stdout.flush().await?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        match parse_input(&line) {
            Input::Exit => break,
            Input::History => show_history(&satellite),
            Input::Unrecognized(token) => {
                warn!("Invalid command '{}'. Please enter {}.", token, USAGE);
            }
            Input::Command(command) => {
                run_command(&executor, &mut satellite, command).await;
            }
        }
    }

    info!("Satellite console stopped");
    Ok(())
}

/// Filter from a `RUST_LOG` value, INFO when unset or unparsable
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Execute one command, report any failure, then show the resulting state
async fn run_command(
    executor: &CommandExecutor,
    satellite: &mut Satellite,
    command: SatelliteCommand,
) {
    match executor.execute(&command, satellite).await {
        Ok(CommandOutcome::Absorbed(e)) => {
            debug!("{} completed with absorbed failure: {}", command.kind(), e);
        }
        Ok(_) => {}
        Err(e) if e.is_expected() => {
            error!("Error executing command: {}", e);
        }
        Err(e) => {
            error!("Unexpected error executing command: {}", e);
        }
    }

    satellite.show_state(executor.observer());
}

fn show_history(satellite: &Satellite) {
    let history = satellite.history();
    info!("Command history ({} entries):", history.len());
    for entry in history {
        info!(
            "  #{} {} (orientation {}) at {}ms",
            entry.sequence, entry.kind, entry.orientation, entry.recorded_at_ms
        );
    }
}
