use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyError};
use crate::security::mode::DeploymentMode;

// Passwords that ship in sample deployment files and tutorials
const WELL_KNOWN_PASSWORDS: &[&str] = &["password", "admin", "changeme", "123456"];

/// Bootstrap administrator created on first start
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

// SECURITY: redact the password from any Debug output
impl fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl BootstrapAdmin {
    pub fn validate(&self, mode: DeploymentMode) -> Result<()> {
        if self.username.is_empty() {
            return Err(TopologyError::invalid(
                "ADMIN_USER",
                "bootstrap admin username must not be empty",
            ));
        }
        if self.password.is_empty() {
            return Err(TopologyError::invalid(
                "ADMIN_PASSWORD",
                "bootstrap admin password must not be empty",
            ));
        }
        // Tolerated in development as a documented exception, never silently
        if mode.is_production()
            && WELL_KNOWN_PASSWORDS.contains(&self.password.to_lowercase().as_str())
        {
            return Err(TopologyError::invalid(
                "ADMIN_PASSWORD",
                "bootstrap admin password is a well-known default",
            ));
        }
        Ok(())
    }
}
