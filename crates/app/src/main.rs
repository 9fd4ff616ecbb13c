//! Studex - Main Entry Point
//!
//! Command-line front end for the student directory. Each invocation is one
//! screen activation: the stored session is resolved, the command runs, and
//! the outcome is printed.

mod cli;
mod commands;
mod config;
mod render;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ctx = match config::build_context(&cli.service) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("studex: {e}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(base_url = %ctx.settings.base_url, "studex starting");

    commands::run(cli.command, &ctx).await
}
