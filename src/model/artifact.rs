//! Pipeline artifact references
//!
//! Artifacts are the values flowing between stages: a source checkout, a
//! build output, a rendered template. `PendingCode` is the handoff contract
//! between the deployment target and the pipeline: the target declares a
//! placeholder for function code, the pipeline resolves it to a concrete
//! location when the deploy action is constructed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Environment;

/// A named artifact produced by one pipeline action and consumed by others
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    name: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference to a single file inside this artifact
    pub fn at_path(&self, file_name: impl Into<String>) -> ArtifactPath {
        ArtifactPath {
            artifact: self.clone(),
            file_name: file_name.into(),
        }
    }
}

/// A file located inside a named artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPath {
    pub artifact: Artifact,
    pub file_name: String,
}

impl ArtifactPath {
    /// `<artifact>::<file>` form used in the synthesized pipeline definition
    pub fn location(&self) -> String {
        format!("{}::{}", self.artifact.name(), self.file_name)
    }
}

/// Storage location of a build output, resolved by the orchestrator at run time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Location {
    pub bucket: String,
    pub object_key: String,
}

/// Placeholder for function code supplied by the pipeline
///
/// The deployment target synthesizes two template parameters; the deploy
/// action assigns them from a build artifact's storage location. The
/// placeholder is the only coupling point between the two models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCode {
    bucket_parameter: String,
    key_parameter: String,
}

impl PendingCode {
    /// Declare a placeholder scoped to one environment's target
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            bucket_parameter: format!("HandlerCodeBucket{environment}"),
            key_parameter: format!("HandlerCodeKey{environment}"),
        }
    }

    pub fn bucket_parameter(&self) -> &str {
        &self.bucket_parameter
    }

    pub fn key_parameter(&self) -> &str {
        &self.key_parameter
    }

    /// Bind the placeholder to a resolved build-output location, producing
    /// the parameter overrides the deploy action carries.
    pub fn assign(&self, location: &S3Location) -> BTreeMap<String, String> {
        let mut overrides = BTreeMap::new();
        overrides.insert(self.bucket_parameter.clone(), location.bucket.clone());
        overrides.insert(self.key_parameter.clone(), location.object_key.clone());
        overrides
    }

    /// Run-time expression for an artifact's storage location
    ///
    /// The orchestrator substitutes the artifact's actual bucket and key
    /// when the deploy action executes.
    pub fn artifact_location(artifact: &Artifact) -> S3Location {
        S3Location {
            bucket: format!("#{{{}.BucketName}}", artifact.name()),
            object_key: format!("#{{{}.ObjectKey}}", artifact.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_path_location() {
        let artifact = Artifact::new("CdkBuildOutput");
        let path = artifact.at_path("BackendStackPPD.template.json");
        assert_eq!(
            path.location(),
            "CdkBuildOutput::BackendStackPPD.template.json"
        );
    }

    #[test]
    fn test_pending_code_parameters_are_environment_scoped() {
        let ppd = PendingCode::for_environment(Environment::Preproduction);
        let prd = PendingCode::for_environment(Environment::Production);
        assert_eq!(ppd.bucket_parameter(), "HandlerCodeBucketPPD");
        assert_eq!(prd.key_parameter(), "HandlerCodeKeyPRD");
        assert_ne!(ppd.bucket_parameter(), prd.bucket_parameter());
    }

    #[test]
    fn test_assign_produces_one_override_per_parameter() {
        let code = PendingCode::for_environment(Environment::Preproduction);
        let artifact = Artifact::new("TestBackendBuildOutputPPD");
        let overrides = code.assign(&PendingCode::artifact_location(&artifact));
        assert_eq!(overrides.len(), 2);
        assert_eq!(
            overrides["HandlerCodeBucketPPD"],
            "#{TestBackendBuildOutputPPD.BucketName}"
        );
        assert_eq!(
            overrides["HandlerCodeKeyPPD"],
            "#{TestBackendBuildOutputPPD.ObjectKey}"
        );
    }
}
