//! Stack deploy actions.
//!
//! A deploy action applies a rendered template to create or update one
//! named stack. The template always comes from the infrastructure build
//! output; the application build output rides along as an extra input so
//! the code placeholder's parameter overrides resolve at deploy time.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::model::{stack_name, Artifact, ArtifactPath, Environment};

/// Create-or-update of one deployment target stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployAction {
    pub action_name: String,
    pub environment: Environment,
    pub stack_name: String,
    pub template: ArtifactPath,
    pub parameter_overrides: BTreeMap<String, String>,
    pub extra_inputs: Vec<Artifact>,
    pub admin_permissions: bool,
    pub run_order: u32,
}

impl DeployAction {
    pub fn create_or_update(
        environment: Environment,
        stack_prefix: &str,
        template: ArtifactPath,
        parameter_overrides: BTreeMap<String, String>,
        extra_inputs: Vec<Artifact>,
    ) -> Self {
        Self {
            action_name: format!("TestBackendDeploy{environment}"),
            environment,
            stack_name: stack_name(stack_prefix, environment),
            template,
            parameter_overrides,
            extra_inputs,
            admin_permissions: true,
            run_order: 1,
        }
    }

    /// All artifacts this action consumes
    pub fn inputs(&self) -> Vec<&Artifact> {
        let mut inputs = vec![&self.template.artifact];
        inputs.extend(self.extra_inputs.iter());
        inputs
    }

    pub fn synthesize(&self) -> Value {
        json!({
            "Name": self.action_name,
            "Kind": "Deploy",
            "Environment": self.environment.tag(),
            "RunOrder": self.run_order,
            "StackName": self.stack_name,
            "TemplatePath": self.template.location(),
            "ParameterOverrides": self.parameter_overrides,
            "AdminPermissions": self.admin_permissions,
            "InputArtifacts": self.inputs().iter().map(|a| a.name()).collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::template_file_name;

    #[test]
    fn test_deploy_targets_environment_stack() {
        let infra = Artifact::new("InfrastructureBuildOutputPPD");
        let app = Artifact::new("TestBackendBuildOutputPPD");
        let action = DeployAction::create_or_update(
            Environment::Preproduction,
            "BackendStack",
            infra.at_path(template_file_name("BackendStack", Environment::Preproduction)),
            BTreeMap::new(),
            vec![app.clone()],
        );
        assert_eq!(action.stack_name, "BackendStackPPD");
        assert!(action.admin_permissions);
        assert_eq!(
            action.template.location(),
            "InfrastructureBuildOutputPPD::BackendStackPPD.template.json"
        );
        let inputs = action.inputs();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0], &infra);
        assert_eq!(inputs[1], &app);
    }
}
