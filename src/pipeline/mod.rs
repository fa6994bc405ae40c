//! Delivery Pipeline Model
//!
//! Assembles the pipeline topology connecting the two source repositories
//! to the deployed targets. The stage order is fixed: Source, Build-PPD,
//! Deploy-PPD (with the approval gate ordered after the deploy), Build-PRD,
//! Deploy-PRD. Validation runs at construction time; execution, retries
//! and failure handling belong to the external orchestrator.

pub mod approval;
pub mod build;
pub mod deploy;
pub mod source;

pub use approval::ApprovalGate;
pub use build::BuildAction;
pub use deploy::DeployAction;
pub use source::SourceAction;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;

use crate::config::SpecConfig;
use crate::error::{AnvilError, PipelineError};
use crate::model::{template_file_name, Artifact, Environment, PendingCode};
use crate::target::DeploymentTarget;

/// The stage names, in execution order
pub const STAGE_ORDER: [&str; 5] = [
    "Source",
    "Build-PPD",
    "Deploy-PPD",
    "Build-PRD",
    "Deploy-PRD",
];

/// One action inside a stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineAction {
    Source(SourceAction),
    Build(BuildAction),
    Deploy(DeployAction),
    Approval(ApprovalGate),
}

impl PipelineAction {
    pub fn name(&self) -> &str {
        match self {
            Self::Source(a) => &a.action_name,
            Self::Build(a) => &a.action_name,
            Self::Deploy(a) => &a.action_name,
            Self::Approval(a) => &a.action_name,
        }
    }

    pub fn run_order(&self) -> u32 {
        match self {
            Self::Source(_) | Self::Build(_) => 1,
            Self::Deploy(a) => a.run_order,
            Self::Approval(a) => a.run_order,
        }
    }

    fn produced(&self) -> Vec<&Artifact> {
        match self {
            Self::Source(a) => vec![&a.output],
            Self::Build(a) => vec![&a.output],
            Self::Deploy(_) | Self::Approval(_) => vec![],
        }
    }

    fn consumed(&self) -> Vec<&Artifact> {
        match self {
            Self::Source(_) | Self::Approval(_) => vec![],
            Self::Build(a) => vec![&a.input],
            Self::Deploy(a) => a.inputs(),
        }
    }

    fn synthesize(&self) -> Value {
        match self {
            Self::Source(a) => a.synthesize(),
            Self::Build(a) => a.synthesize(),
            Self::Deploy(a) => a.synthesize(),
            Self::Approval(a) => a.synthesize(),
        }
    }
}

/// A named, run-order-tagged group of actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub actions: Vec<PipelineAction>,
}

/// The full delivery pipeline, validated at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub name: String,
    pub stages: Vec<Stage>,
}

impl Pipeline {
    pub fn total_actions(&self) -> usize {
        self.stages.iter().map(|s| s.actions.len()).sum()
    }

    /// Construction-time topology checks: fixed stage order, unique
    /// artifact names, every consumed artifact produced by a strictly
    /// earlier stage, approval gates ordered after their stage's deploy.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.stages.is_empty() {
            return Err(PipelineError::Empty);
        }
        if self.stages.len() != STAGE_ORDER.len() {
            let position = self.stages.len().min(STAGE_ORDER.len());
            return Err(PipelineError::StageOrder {
                position,
                expected: STAGE_ORDER.get(position).copied().unwrap_or("<end>").to_string(),
                found: self
                    .stages
                    .get(position)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| "<missing>".to_string()),
            });
        }
        for (position, (stage, expected)) in self.stages.iter().zip(STAGE_ORDER).enumerate() {
            if stage.name != expected {
                return Err(PipelineError::StageOrder {
                    position,
                    expected: expected.to_string(),
                    found: stage.name.clone(),
                });
            }
        }

        let mut available: HashSet<String> = HashSet::new();
        for stage in &self.stages {
            for action in &stage.actions {
                for artifact in action.consumed() {
                    if !available.contains(artifact.name()) {
                        return Err(PipelineError::ArtifactNotAvailable {
                            stage: stage.name.clone(),
                            action: action.name().to_string(),
                            artifact: artifact.name().to_string(),
                        });
                    }
                }
            }
            for action in &stage.actions {
                for artifact in action.produced() {
                    if !available.insert(artifact.name().to_string()) {
                        return Err(PipelineError::DuplicateArtifact(
                            artifact.name().to_string(),
                        ));
                    }
                }
            }
        }

        for stage in &self.stages {
            let deploy_order = stage.actions.iter().find_map(|a| match a {
                PipelineAction::Deploy(d) => Some(d.run_order),
                _ => None,
            });
            if let Some(deploy_run_order) = deploy_order {
                for action in &stage.actions {
                    if let PipelineAction::Approval(gate) = action {
                        if gate.run_order <= deploy_run_order {
                            return Err(PipelineError::GateBeforeDeploy {
                                gate: gate.action_name.clone(),
                                deploy_run_order,
                                gate_run_order: gate.run_order,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Render the pipeline definition document
    pub fn synthesize(&self) -> Value {
        json!({
            "Name": self.name,
            "Stages": self.stages.iter().map(|stage| json!({
                "Name": stage.name,
                "Actions": stage.actions.iter().map(|a| a.synthesize()).collect::<Vec<_>>(),
            })).collect::<Vec<_>>(),
        })
    }
}

/// What the pipeline needs from one deployment target: the code
/// placeholder to bind and the endpoint URL for the approval gate.
/// The explicit handoff contract between the two models.
#[derive(Debug, Clone)]
pub struct TargetHandle {
    pub environment: Environment,
    pub pending_code: PendingCode,
    pub endpoint_url: String,
}

impl TargetHandle {
    pub fn from_target(target: &DeploymentTarget) -> Self {
        Self {
            environment: target.environment(),
            pending_code: target.pending_code(),
            endpoint_url: target.endpoint_url(),
        }
    }
}

/// Assembles the fixed five-stage topology from configuration and the
/// two target handles.
pub struct PipelineBuilder<'a> {
    config: &'a SpecConfig,
    preproduction: TargetHandle,
    production: TargetHandle,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(
        config: &'a SpecConfig,
        preproduction: TargetHandle,
        production: TargetHandle,
    ) -> Self {
        Self {
            config,
            preproduction,
            production,
        }
    }

    pub fn build(self) -> Result<Pipeline, AnvilError> {
        let connection_arn = self.config.sources.connection_arn()?;
        let prefix = &self.config.stack.name_prefix;

        let application_source = Artifact::new("ApplicationSourceOutput");
        let infrastructure_source = Artifact::new("InfrastructureSourceOutput");

        let source_stage = Stage {
            name: "Source".to_string(),
            actions: vec![
                PipelineAction::Source(SourceAction::new(
                    "CheckoutApplication",
                    connection_arn,
                    &self.config.sources.application,
                    application_source.clone(),
                )),
                PipelineAction::Source(SourceAction::new(
                    "CheckoutInfrastructure",
                    connection_arn,
                    &self.config.sources.infrastructure,
                    infrastructure_source.clone(),
                )),
            ],
        };

        let mut stages = vec![source_stage];
        for handle in [&self.preproduction, &self.production] {
            let environment = handle.environment;
            let infrastructure_output =
                Artifact::new(format!("InfrastructureBuildOutput{environment}"));
            let application_output = Artifact::new(format!("TestBackendBuildOutput{environment}"));

            let build_stage = Stage {
                name: format!("Build-{environment}"),
                actions: vec![
                    PipelineAction::Build(BuildAction::infrastructure(
                        environment,
                        prefix,
                        &self.config.build,
                        infrastructure_source.clone(),
                        infrastructure_output.clone(),
                    )),
                    PipelineAction::Build(BuildAction::application(
                        environment,
                        &self.config.build,
                        application_source.clone(),
                        application_output.clone(),
                    )),
                ],
            };

            let overrides = handle
                .pending_code
                .assign(&PendingCode::artifact_location(&application_output));
            let deploy = DeployAction::create_or_update(
                environment,
                prefix,
                infrastructure_output.at_path(template_file_name(prefix, environment)),
                overrides,
                vec![application_output],
            );

            let mut deploy_actions = vec![PipelineAction::Deploy(deploy.clone())];
            if environment == Environment::Preproduction {
                let gate = ApprovalGate::new(
                    "DeployBackendToProductionApproval",
                    "Ready to deploy to Production?",
                    &self.preproduction.endpoint_url,
                    deploy.run_order + 1,
                )?;
                deploy_actions.push(PipelineAction::Approval(gate));
            }

            stages.push(build_stage);
            stages.push(Stage {
                name: format!("Deploy-{environment}"),
                actions: deploy_actions,
            });
        }

        let pipeline = Pipeline {
            name: "BackendDeliveryPipeline".to_string(),
            stages,
        };
        pipeline.validate()?;
        Ok(pipeline)
    }
}
