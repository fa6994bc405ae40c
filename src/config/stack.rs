//! Deployment target configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Naming and runtime settings shared by both deployment targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    /// Stack name prefix; the environment tag is appended per target
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,

    /// HTTP API display name
    #[serde(default = "default_api_name")]
    pub api_name: String,

    /// Function runtime identifier
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Function entry-point name
    #[serde(default = "default_handler")]
    pub handler: String,
}

fn default_name_prefix() -> String {
    "BackendStack".to_string()
}

fn default_api_name() -> String {
    "test-backend-api".to_string()
}

fn default_runtime() -> String {
    "go1.x".to_string()
}

fn default_handler() -> String {
    "testbackend".to_string()
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            name_prefix: default_name_prefix(),
            api_name: default_api_name(),
            runtime: default_runtime(),
            handler: default_handler(),
        }
    }
}

impl StackConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyStackPrefix);
        }
        for (field, value) in [
            ("stack.api_name", &self.api_name),
            ("stack.runtime", &self.runtime),
            ("stack.handler", &self.handler),
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
