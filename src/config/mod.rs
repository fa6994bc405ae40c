//! # Specification Configuration
//!
//! Everything the deployment model is parameterized by lives in a single
//! `anvil.yaml` at the repository root: stack naming, source repositories,
//! and build settings. Defaults reproduce the canonical backend stack, so
//! an empty file is a valid starting point for everything except the
//! source connection, which has no meaningful default and must be set
//! explicitly.
//!
//! ## Example
//!
//! ```yaml
//! stack:
//!   name_prefix: BackendStack
//! sources:
//!   connection_arn: arn:aws:codestar-connections:us-east-1:111111111111:connection/abc
//!   application:
//!     owner: TestLambdaProjectOrg
//!     repo: backend
//! build:
//!   output_file: testbackend
//! ```

mod build;
mod sources;
mod stack;

pub use build::BuildConfig;
pub use sources::{SourceRepo, SourcesConfig};
pub use stack::StackConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Root of `anvil.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecConfig {
    /// Deployment target settings
    #[serde(default)]
    pub stack: StackConfig,

    /// Pipeline source repositories
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Build task settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SpecConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: SpecConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Invalid {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Construction-time validation; nothing downstream tolerates a
    /// partially-specified model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stack.validate()?;
        self.sources.validate()?;
        self.build.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("anvil.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_minimal_config() {
        let (_dir, path) = write_config(
            "sources:\n  connection_arn: arn:aws:codestar-connections:us-east-1:1:connection/x\n",
        );
        let config = SpecConfig::load(&path).unwrap();
        assert_eq!(config.stack.name_prefix, "BackendStack");
        assert_eq!(config.build.output_file, "testbackend");
    }

    #[test]
    fn test_missing_connection_arn_fails_load() {
        let (_dir, path) = write_config("stack:\n  name_prefix: BackendStack\n");
        let err = SpecConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingConnectionArn));
    }

    #[test]
    fn test_unparseable_config_reports_path() {
        let (_dir, path) = write_config("stack: [not, a, mapping]\n");
        let err = SpecConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_missing_file_is_unreadable_with_cause() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = SpecConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        match err {
            ConfigError::Unreadable { path, message } => {
                assert!(path.ends_with("absent.yaml"));
                assert!(!message.is_empty(), "OS error cause was dropped");
            }
            other => panic!("expected Unreadable, got {other:?}"),
        }
    }
}
