//! Terminal frontend for the task API.

mod cli;
mod commands;
mod view;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use task_core::TaskApi;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "task_cli=debug,task_core=debug"
    } else {
        "task_cli=info,task_core=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = commands::resolve_config(&cli).and_then(|config| {
        tracing::debug!(base_url = %config.base_url, layout = %config.layout, "resolved configuration");
        let api = TaskApi::from_config(&config);
        commands::run(&api, &cli.command, cli.skip_health_check, &mut io::stdout())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            view::error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}
