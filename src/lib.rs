pub mod cli;
pub mod config;
pub mod models;
pub mod risk;
pub mod scenarios;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub fn run() -> ExitCode {
    // Logs go to stderr; stdout carries the JSON and scenario output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(config::LOG_ENV_VAR)
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::debug!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // Usage errors, --help and --version exit here with clap's own codes.
    let command = cli::Cli::parse().into_command();
    let result = risk::DefaultRiskEngine::standard()
        .and_then(|engine| cli::execute(&command, &engine, &mut std::io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
