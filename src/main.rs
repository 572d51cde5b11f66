//! `takeout`: audit and enrich extracted Google Takeout exports.

mod cli;
mod commands;
mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::Status;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let status = match commands::run(cli).await {
        Ok(status) => status,
        Err(err) => {
            tracing::error!(error = ?err, "Aborted");
            eprintln!("error: {}", *err);
            Status::Fatal
        },
    };
    status.into()
}

/// `RUST_LOG` wins over the verbosity flags when it's set.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.level().to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
