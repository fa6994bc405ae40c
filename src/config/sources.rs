//! Pipeline source repository configuration.
//!
//! Two repositories feed the pipeline: the application source (the
//! function code) and the infrastructure source (this specification).
//! Both are fetched through one externally-provisioned source connection.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// (owner, repository, branch) triple for one source fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRepo {
    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub repo: String,

    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl SourceRepo {
    fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: default_branch(),
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        for (field, value) in [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("branch", &self.branch),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::IncompleteSource {
                    source_name: name.to_string(),
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Source section of `anvil.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Identifier of the provisioned source-control connection.
    /// Required; there is no usable default.
    #[serde(default)]
    pub connection_arn: Option<String>,

    /// Application source repository
    #[serde(default = "default_application")]
    pub application: SourceRepo,

    /// Infrastructure source repository
    #[serde(default = "default_infrastructure")]
    pub infrastructure: SourceRepo,
}

fn default_application() -> SourceRepo {
    SourceRepo::new("TestLambdaProjectOrg", "backend")
}

fn default_infrastructure() -> SourceRepo {
    SourceRepo::new("TestLambdaProjectOrg", "backend-devops")
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            connection_arn: None,
            application: default_application(),
            infrastructure: default_infrastructure(),
        }
    }
}

impl SourcesConfig {
    /// The validated connection identifier
    pub fn connection_arn(&self) -> Result<&str, ConfigError> {
        match self.connection_arn.as_deref() {
            Some(arn) if !arn.trim().is_empty() => Ok(arn),
            _ => Err(ConfigError::MissingConnectionArn),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.connection_arn()?;
        self.application.validate("application")?;
        self.infrastructure.validate("infrastructure")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources_lack_connection() {
        let config = SourcesConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingConnectionArn)
        ));
        assert_eq!(config.application.repo, "backend");
        assert_eq!(config.infrastructure.repo, "backend-devops");
        assert_eq!(config.application.branch, "main");
    }

    #[test]
    fn test_blank_connection_arn_rejected() {
        let config = SourcesConfig {
            connection_arn: Some("   ".to_string()),
            ..SourcesConfig::default()
        };
        assert!(matches!(
            config.connection_arn(),
            Err(ConfigError::MissingConnectionArn)
        ));
    }

    #[test]
    fn test_incomplete_repo_rejected() {
        let mut config = SourcesConfig {
            connection_arn: Some("arn:aws:codestar-connections:us-east-1:1:connection/x".into()),
            ..SourcesConfig::default()
        };
        config.application.owner.clear();
        match config.validate() {
            Err(ConfigError::IncompleteSource { source_name, field }) => {
                assert_eq!(source_name, "application");
                assert_eq!(field, "owner");
            }
            other => panic!("expected IncompleteSource, got {other:?}"),
        }
    }

    #[test]
    fn test_incomplete_source_message_names_the_source() {
        let mut config = SourcesConfig {
            connection_arn: Some("arn:aws:codestar-connections:us-east-1:1:connection/x".into()),
            ..SourcesConfig::default()
        };
        config.infrastructure.branch.clear();
        let message = config.validate().unwrap_err().to_string();
        assert_eq!(
            message,
            "Source 'infrastructure' is missing required field 'branch'"
        );
    }
}
