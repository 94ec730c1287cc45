//! Deployment mode detection
//!
//! The original deployment files carried no development/production
//! distinction; validation strictness was the same (none) everywhere. Here
//! the mode gates the insecure-value checks: production rejects placeholder
//! secrets, wildcard hosts and default admin passwords outright, while
//! development only has to be structurally sound.

use serde::{Deserialize, Serialize};

use crate::source::VarSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Development,
    Production,
}

impl DeploymentMode {
    /// Detect the mode from `DEPLOYMENT_MODE` (fallbacks: `RUST_ENV`,
    /// `ENVIRONMENT`). Anything that is not an explicit production marker is
    /// treated as development.
    pub fn detect(source: &dyn VarSource) -> Self {
        let environment = source
            .get_first(&["DEPLOYMENT_MODE", "RUST_ENV", "ENVIRONMENT"])
            .unwrap_or_else(|| "development".to_string());

        if matches!(
            environment.to_lowercase().as_str(),
            "production" | "prod" | "release"
        ) {
            DeploymentMode::Production
        } else {
            DeploymentMode::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, DeploymentMode::Production)
    }
}
