use anyhow::Result;
use clap::Parser;

mod app;
mod cli;
mod commands;
mod config;
mod error;
mod model;
mod pipeline;
mod target;
mod ui;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with LOGGING env var support
    // LOGGING=debug,info,warn,error or just LOGGING=debug
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if cli.verbose {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .init();

    match cli.command {
        Commands::Synth { config, output } => {
            commands::synth::execute(&config, &output)?;
        }
        Commands::Check { config } => {
            commands::check::execute(&config)?;
        }
    }

    Ok(())
}
