//! Source fetch actions.
//!
//! Both repositories are checked out through one externally-provisioned
//! source-control connection; the connection protocol itself is the
//! orchestrator's concern.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::SourceRepo;
use crate::model::Artifact;

/// Checkout of one (owner, repository, branch) triple into an artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceAction {
    pub action_name: String,
    pub connection_arn: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub output: Artifact,
}

impl SourceAction {
    pub fn new(
        action_name: impl Into<String>,
        connection_arn: impl Into<String>,
        repo: &SourceRepo,
        output: Artifact,
    ) -> Self {
        Self {
            action_name: action_name.into(),
            connection_arn: connection_arn.into(),
            owner: repo.owner.clone(),
            repo: repo.repo.clone(),
            branch: repo.branch.clone(),
            output,
        }
    }

    pub fn synthesize(&self) -> Value {
        json!({
            "Name": self.action_name,
            "Kind": "Source",
            "ConnectionArn": self.connection_arn,
            "Owner": self.owner,
            "Repo": self.repo,
            "Branch": self.branch,
            "OutputArtifacts": [self.output.name()],
        })
    }
}
