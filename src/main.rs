use clap::Parser;
use square_dispatch::api::cli::Cli;
use square_dispatch::api::{execute, render};
use square_dispatch::{Dispatcher, SquareConfig};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match SquareConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let dispatcher = match Dispatcher::from_config(config) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            error!(error = %e, "failed to build http client");
            return ExitCode::FAILURE;
        }
    };

    let outcome = execute(&dispatcher, cli.command).await;
    println!("{}", render(&outcome));
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
