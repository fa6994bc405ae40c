//! Domain layer - pure specification types
//!
//! This module contains the building blocks of the deployment model with
//! no external I/O. Types and functions here can be unit tested without
//! mocking.

pub mod artifact;
pub mod environment;

// Re-export commonly used types
pub use artifact::{Artifact, ArtifactPath, PendingCode};
pub use environment::Environment;

/// `<stackNamePrefix><ENV>`
pub fn stack_name(prefix: &str, environment: Environment) -> String {
    format!("{prefix}{environment}")
}

/// `<stackNamePrefix><ENV>.template.json`
pub fn template_file_name(prefix: &str, environment: Environment) -> String {
    format!("{}.template.json", stack_name(prefix, environment))
}
