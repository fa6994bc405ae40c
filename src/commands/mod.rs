//! Command executors, one module per CLI subcommand.

pub mod check;
pub mod synth;
