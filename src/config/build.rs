//! Build task configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Settings shared by the pipeline's build tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Container image for the infrastructure build
    #[serde(default = "default_infrastructure_image")]
    pub infrastructure_image: String,

    /// Container image for the application build
    #[serde(default = "default_application_image")]
    pub application_image: String,

    /// Directory inside the application source the build runs from
    #[serde(default = "default_base_directory")]
    pub base_directory: String,

    /// Name of the compiled application binary
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Extra environment variables for the application build.
    /// `APP_ENV` is always injected and cannot be overridden here.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

fn default_infrastructure_image() -> String {
    "standard:5.0".to_string()
}

fn default_application_image() -> String {
    "standard:2.0".to_string()
}

fn default_base_directory() -> String {
    ".".to_string()
}

fn default_output_file() -> String {
    "testbackend".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            infrastructure_image: default_infrastructure_image(),
            application_image: default_application_image(),
            base_directory: default_base_directory(),
            output_file: default_output_file(),
            variables: BTreeMap::new(),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("build.infrastructure_image", &self.infrastructure_image),
            ("build.application_image", &self.application_image),
            ("build.base_directory", &self.base_directory),
            ("build.output_file", &self.output_file),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.base_directory, ".");
        assert_eq!(config.output_file, "testbackend");
        assert!(config.variables.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_output_file_rejected() {
        let config = BuildConfig {
            output_file: String::new(),
            ..BuildConfig::default()
        };
        match config.validate() {
            Err(ConfigError::EmptyField { field }) => {
                assert_eq!(field, "build.output_file");
            }
            other => panic!("expected EmptyField, got {other:?}"),
        }
    }
}
