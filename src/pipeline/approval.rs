//! Manual approval gate.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::PipelineError;

/// Human checkpoint blocking progression to the production stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalGate {
    pub action_name: String,
    pub message: String,
    /// Link surfaced to the approver, the pre-production endpoint
    pub external_link: String,
    pub run_order: u32,
}

impl ApprovalGate {
    /// Construct the gate; an empty endpoint link is a configuration
    /// error, not something to propagate into the resource graph.
    pub fn new(
        action_name: impl Into<String>,
        message: impl Into<String>,
        external_link: impl Into<String>,
        run_order: u32,
    ) -> Result<Self, PipelineError> {
        let external_link = external_link.into();
        if external_link.trim().is_empty() {
            return Err(PipelineError::MissingEndpointUrl);
        }
        Ok(Self {
            action_name: action_name.into(),
            message: message.into(),
            external_link,
            run_order,
        })
    }

    pub fn synthesize(&self) -> Value {
        json!({
            "Name": self.action_name,
            "Kind": "Approval",
            "RunOrder": self.run_order,
            "Message": self.message,
            "ExternalLink": self.external_link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_requires_endpoint_link() {
        let err = ApprovalGate::new("Approve", "Ready?", "  ", 2).unwrap_err();
        assert!(matches!(err, PipelineError::MissingEndpointUrl));
    }

    #[test]
    fn test_gate_synthesis() {
        let gate = ApprovalGate::new(
            "DeployBackendToProductionApproval",
            "Ready to deploy to Production?",
            "https://example.test/",
            2,
        )
        .unwrap();
        let synth = gate.synthesize();
        assert_eq!(synth["Kind"], "Approval");
        assert_eq!(synth["RunOrder"], 2);
        assert_eq!(synth["ExternalLink"], "https://example.test/");
    }
}
