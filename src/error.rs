//! Centralized error types for anvil
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.

use thiserror::Error;

/// Top-level error type for anvil operations
#[derive(Error, Debug)]
pub enum AnvilError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Synthesis error: {0}")]
    Synth(#[from] SynthError),
}

/// Specification configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Source connection ARN is not set. Add sources.connection_arn to anvil.yaml")]
    MissingConnectionArn,

    #[error("Source '{source_name}' is missing required field '{field}'")]
    IncompleteSource { source_name: String, field: String },

    #[error("Stack name prefix cannot be empty")]
    EmptyStackPrefix,

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Failed to read configuration file {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Failed to parse configuration file {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Pipeline topology errors, raised at construction time
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Action '{action}' in stage '{stage}' consumes artifact '{artifact}' before any earlier stage produces it")]
    ArtifactNotAvailable {
        stage: String,
        action: String,
        artifact: String,
    },

    #[error("Approval gate '{gate}' must run strictly after the deploy action (deploy run order {deploy_run_order}, gate run order {gate_run_order})")]
    GateBeforeDeploy {
        gate: String,
        deploy_run_order: u32,
        gate_run_order: u32,
    },

    #[error("Approval gate endpoint link is empty; the pre-production target did not expose an endpoint URL")]
    MissingEndpointUrl,

    #[error("Pipeline has no stages")]
    Empty,

    #[error("Fixed stage order violated: expected stage '{expected}' at position {position}, found '{found}'")]
    StageOrder {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("Duplicate artifact name '{0}'; artifact names must be unique across the pipeline")]
    DuplicateArtifact(String),
}

/// Resource graph synthesis errors
#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Failed to create output directory {path}: {message}")]
    OutputDir { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}
