//! Deployment environment discriminator
//!
//! Every environment-scoped resource name carries the environment tag as a
//! suffix so that the two instances never collide by name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deployment tier for a target or build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Pre-production, deployed first and gated by manual approval
    Preproduction,
    /// Production, deployed only after the approval gate clears
    Production,
}

impl Environment {
    /// Both environments, in deployment order
    pub const ALL: [Environment; 2] = [Environment::Preproduction, Environment::Production];

    /// Short tag used as a resource-name suffix and as the APP_ENV value
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Preproduction => "PPD",
            Self::Production => "PRD",
        }
    }

    /// Human-readable name for reports and messages
    pub fn long_name(&self) -> &'static str {
        match self {
            Self::Preproduction => "pre-production",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_distinct_suffixes() {
        assert_eq!(Environment::Preproduction.tag(), "PPD");
        assert_eq!(Environment::Production.tag(), "PRD");
        assert_ne!(
            Environment::Preproduction.tag(),
            Environment::Production.tag()
        );
    }

    #[test]
    fn test_display_matches_tag() {
        for env in Environment::ALL {
            assert_eq!(env.to_string(), env.tag());
        }
    }

    #[test]
    fn test_deployment_order() {
        assert_eq!(
            Environment::ALL,
            [Environment::Preproduction, Environment::Production]
        );
    }
}
