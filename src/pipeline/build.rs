//! Build actions and their build specifications.
//!
//! A build specification is an ordered command list per phase plus an
//! artifact selection rule (base directory + file names), executed in a
//! container whose environment always carries `APP_ENV=<tag>`. Build
//! actions exist per (kind x environment) pair so each environment's
//! artifacts embed its own tag and never leak across environments.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::config::BuildConfig;
use crate::model::{template_file_name, Artifact, Environment};

/// Ordered install/build command phases plus the artifact selection rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
    pub install_commands: Vec<String>,
    pub build_commands: Vec<String>,
    pub base_directory: String,
    pub files: Vec<String>,
}

impl BuildSpec {
    /// Render in the external build executor's buildspec shape
    pub fn to_json(&self) -> Value {
        json!({
            "version": "0.2",
            "phases": {
                "install": { "commands": self.install_commands },
                "build": { "commands": self.build_commands },
            },
            "artifacts": {
                "base-directory": self.base_directory,
                "files": self.files,
            },
        })
    }
}

/// Container the build runs in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContainer {
    pub image: String,
    pub variables: BTreeMap<String, String>,
}

impl BuildContainer {
    /// Merge caller-supplied variables under the mandatory APP_ENV binding.
    /// APP_ENV is written last so extras can never override it.
    fn with_app_env(
        image: impl Into<String>,
        environment: Environment,
        extras: &BTreeMap<String, String>,
    ) -> Self {
        let mut variables = extras.clone();
        variables.insert("APP_ENV".to_string(), environment.tag().to_string());
        Self {
            image: image.into(),
            variables,
        }
    }
}

/// A named unit of work transforming input artifacts into output artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildAction {
    pub action_name: String,
    pub project_name: String,
    pub environment: Environment,
    pub spec: BuildSpec,
    pub container: BuildContainer,
    pub input: Artifact,
    pub output: Artifact,
}

impl BuildAction {
    /// Build task rendering the infrastructure definitions into this
    /// environment's template file.
    pub fn infrastructure(
        environment: Environment,
        stack_prefix: &str,
        config: &BuildConfig,
        input: Artifact,
        output: Artifact,
    ) -> Self {
        let spec = BuildSpec {
            install_commands: vec!["npm install".to_string()],
            build_commands: vec![
                "npm run build".to_string(),
                "npm run synth -- -o dist".to_string(),
            ],
            base_directory: "dist".to_string(),
            files: vec![template_file_name(stack_prefix, environment)],
        };
        Self {
            action_name: format!("InfrastructureBuild{environment}"),
            project_name: format!("InfrastructureBuildProject{environment}"),
            environment,
            spec,
            container: BuildContainer::with_app_env(
                &config.infrastructure_image,
                environment,
                &BTreeMap::new(),
            ),
            input,
            output,
        }
    }

    /// Build task compiling the application binary for one environment
    pub fn application(
        environment: Environment,
        config: &BuildConfig,
        input: Artifact,
        output: Artifact,
    ) -> Self {
        let spec = BuildSpec {
            install_commands: vec![
                format!("cd {}", config.base_directory),
                "go get ./...".to_string(),
            ],
            build_commands: vec![format!("go build -o {}", config.output_file)],
            base_directory: config.base_directory.clone(),
            files: vec![config.output_file.clone()],
        };
        Self {
            action_name: format!("TestBackendBuild{environment}"),
            project_name: format!("TestBackend{environment}-Build"),
            environment,
            spec,
            container: BuildContainer::with_app_env(
                &config.application_image,
                environment,
                &config.variables,
            ),
            input,
            output,
        }
    }

    pub fn synthesize(&self) -> Value {
        json!({
            "Name": self.action_name,
            "Kind": "Build",
            "Project": self.project_name,
            "Environment": self.environment.tag(),
            "Container": {
                "Image": self.container.image,
                "EnvironmentVariables": self.container.variables,
            },
            "BuildSpec": self.spec.to_json(),
            "InputArtifacts": [self.input.name()],
            "OutputArtifacts": [self.output.name()],
        })
    }
}
