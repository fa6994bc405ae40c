//! CLI definitions for anvil
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "anvil",
    version,
    about = "Deployment specification synthesizer",
    long_about = "Constructs the backend deployment targets and delivery pipeline\nas a typed model and renders them into a static resource graph\nfor the external orchestrator."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the resource graph to an output directory
    Synth {
        /// Path to the specification configuration
        #[arg(long, short = 'c', env = "ANVIL_CONFIG", default_value = "anvil.yaml")]
        config: PathBuf,

        /// Output directory for templates and the pipeline definition
        #[arg(long, short = 'o', default_value = "dist")]
        output: PathBuf,
    },

    /// Validate the configuration and model, printing the topology
    Check {
        /// Path to the specification configuration
        #[arg(long, short = 'c', env = "ANVIL_CONFIG", default_value = "anvil.yaml")]
        config: PathBuf,
    },
}
