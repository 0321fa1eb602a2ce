use std::process::ExitCode;

use clap::Parser;

use league_presence::app::{self, Shutdown};
use league_presence::cli::Cli;
use league_presence::logging::init_logging;
use league_presence::settings::load_settings;
use league_presence::Error;

fn report(e: &Error) {
    tracing::error!("{}", e);
    eprintln!("Error: {}", e);
    if let Some(guidance) = e.guidance() {
        eprintln!("{}", guidance);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.debug);

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            report(&e);
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::debug!(?settings, "Settings loaded");

    match app::run(settings).await {
        Ok(Shutdown::ClientClosed) | Ok(Shutdown::Interrupted) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_fatal() => {
            report(&e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(anyhow::anyhow!(e)),
    }
}
