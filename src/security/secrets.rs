//! Signing and broadcast secrets
//!
//! These values authenticate inter-node websocket broadcasts and sign
//! session material for the rest of the platform. They must be unique per
//! deployment and must never reach log output; `Debug` is implemented by
//! hand so no derive can leak them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MIN_SECRET_LENGTH;
use crate::error::{Result, TopologyError};
use crate::security::mode::DeploymentMode;

/// Transport used for inter-node broadcast websocket connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastProtocol {
    Http,
    Https,
}

impl BroadcastProtocol {
    pub fn parse(field: &str, raw: &str) -> Result<Self> {
        match raw.to_lowercase().as_str() {
            "http" => Ok(BroadcastProtocol::Http),
            "https" => Ok(BroadcastProtocol::Https),
            other => Err(TopologyError::invalid(
                field,
                format!("'{}' is not a broadcast protocol (http or https)", other),
            )),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySettings {
    pub secret_key: String,
    pub broadcast_secret: String,
    pub broadcast_protocol: BroadcastProtocol,
    pub broadcast_port: u16,
    /// Host patterns permitted to serve the application
    pub allowed_hosts: Vec<String>,
}

// SECURITY: redact secret material from any Debug output
impl fmt::Debug for SecuritySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecuritySettings")
            .field("secret_key", &"[REDACTED]")
            .field("broadcast_secret", &"[REDACTED]")
            .field("broadcast_protocol", &self.broadcast_protocol)
            .field("broadcast_port", &self.broadcast_port)
            .field("allowed_hosts", &self.allowed_hosts)
            .finish()
    }
}

impl SecuritySettings {
    pub fn validate(&self, mode: DeploymentMode) -> Result<()> {
        if self.secret_key.is_empty() {
            return Err(TopologyError::invalid("SECRET_KEY", "secret key must not be empty"));
        }
        if self.broadcast_secret.is_empty() {
            return Err(TopologyError::invalid(
                "BROADCAST_WEBSOCKET_SECRET",
                "broadcast secret must not be empty",
            ));
        }
        if self.broadcast_port == 0 {
            return Err(TopologyError::invalid(
                "BROADCAST_WEBSOCKET_PORT",
                "broadcast port must not be 0",
            ));
        }
        if self.allowed_hosts.is_empty() {
            return Err(TopologyError::invalid(
                "ALLOWED_HOSTS",
                "at least one allowed host pattern is required",
            ));
        }

        if mode.is_production() {
            validate_secret_strength("SECRET_KEY", &self.secret_key)?;
            validate_secret_strength("BROADCAST_WEBSOCKET_SECRET", &self.broadcast_secret)?;

            if self.allowed_hosts.iter().any(|h| h == "*") {
                return Err(TopologyError::invalid(
                    "ALLOWED_HOSTS",
                    "unrestricted wildcard '*' is not allowed in production",
                ));
            }
        }
        Ok(())
    }
}

/// Reject secrets that look like placeholders or lack basic entropy.
///
/// Pattern list covers the defaults that ship in sample deployment files;
/// operators must generate real secrets (openssl rand -base64 32).
pub fn validate_secret_strength(field: &str, secret: &str) -> Result<()> {
    if secret.len() < MIN_SECRET_LENGTH {
        return Err(TopologyError::invalid(
            field,
            format!("secret must be at least {} characters long", MIN_SECRET_LENGTH),
        ));
    }

    let insecure_patterns = [
        "secret",
        "password",
        "changeme",
        "default",
        "example",
        "test",
        "awx",
        "12345",
    ];

    let lowered = secret.to_lowercase();
    for pattern in &insecure_patterns {
        if lowered.contains(pattern) {
            return Err(TopologyError::invalid(
                field,
                format!(
                    "secret contains placeholder pattern '{}'; generate one with: openssl rand -base64 32",
                    pattern
                ),
            ));
        }
    }

    // A single repeated character defeats the length requirement
    let mut chars = secret.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return Err(TopologyError::invalid(field, "secret is a single repeated character"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(secret_key: &str, broadcast_secret: &str) -> SecuritySettings {
        SecuritySettings {
            secret_key: secret_key.to_string(),
            broadcast_secret: broadcast_secret.to_string(),
            broadcast_protocol: BroadcastProtocol::Http,
            broadcast_port: 8052,
            allowed_hosts: vec!["platform.internal".to_string()],
        }
    }

    const STRONG_A: &str = "Kx9mP2nQ7rS8tU3vW6xY1zA4bC5dE8fG";
    const STRONG_B: &str = "a9b8c7d6e5f4g3h2i1j0k9l8m7n6o5p4";

    #[test]
    fn test_strong_secrets_pass_production() {
        let s = settings(STRONG_A, STRONG_B);
        assert!(s.validate(DeploymentMode::Production).is_ok());
    }

    #[test]
    fn test_placeholder_secret_rejected_in_production() {
        let s = settings("awxsecret12345awxsecret12345", STRONG_B);
        let err = s.validate(DeploymentMode::Production).unwrap_err();
        assert_eq!(err.field(), "SECRET_KEY");
    }

    #[test]
    fn test_placeholder_secret_tolerated_in_development() {
        let s = settings("awxsecret12345", "awxbroadcastsecret");
        assert!(s.validate(DeploymentMode::Development).is_ok());
    }

    #[test]
    fn test_empty_secret_rejected_in_any_mode() {
        let s = settings("", STRONG_B);
        assert!(s.validate(DeploymentMode::Development).is_err());
        assert!(s.validate(DeploymentMode::Production).is_err());
    }

    #[test]
    fn test_short_secret_rejected_in_production() {
        assert!(validate_secret_strength("SECRET_KEY", "Kx9mP2nQ7rS").is_err());
    }

    #[test]
    fn test_repeated_character_secret_rejected() {
        assert!(validate_secret_strength("SECRET_KEY", "aaaaaaaaaaaaaaaaaaaa").is_err());
    }

    #[test]
    fn test_wildcard_hosts_rejected_in_production_only() {
        let mut s = settings(STRONG_A, STRONG_B);
        s.allowed_hosts = vec!["*".to_string()];

        assert!(s.validate(DeploymentMode::Development).is_ok());
        let err = s.validate(DeploymentMode::Production).unwrap_err();
        assert_eq!(err.field(), "ALLOWED_HOSTS");
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let s = settings(STRONG_A, STRONG_B);
        let rendered = format!("{:?}", s);
        assert!(!rendered.contains(STRONG_A));
        assert!(!rendered.contains(STRONG_B));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_protocol_parsing() {
        assert_eq!(
            BroadcastProtocol::parse("BROADCAST_WEBSOCKET_PROTOCOL", "https").unwrap(),
            BroadcastProtocol::Https
        );
        assert!(BroadcastProtocol::parse("BROADCAST_WEBSOCKET_PROTOCOL", "wss").is_err());
    }
}
