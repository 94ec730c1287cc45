use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyError};

/// Relational database connection specification
///
/// host + port + name uniquely identify one reachable database instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSpec {
    pub engine: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Wrap each request in a transaction
    pub atomic_requests: bool,
}

// SECURITY: redact the database password from any Debug output
impl fmt::Debug for DatabaseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSpec")
            .field("engine", &self.engine)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("atomic_requests", &self.atomic_requests)
            .finish()
    }
}

impl DatabaseSpec {
    /// Whether the configured engine authenticates clients.
    ///
    /// File-backed engines (sqlite) accept empty credentials; every
    /// server-backed engine we support requires them.
    pub fn engine_requires_auth(&self) -> bool {
        !self.engine.to_lowercase().contains("sqlite")
    }

    pub fn validate(&self) -> Result<()> {
        if self.engine.is_empty() {
            return Err(TopologyError::invalid("DB_ENGINE", "engine must not be empty"));
        }
        if self.name.is_empty() {
            return Err(TopologyError::invalid("DB_NAME", "database name must not be empty"));
        }
        if self.host.is_empty() {
            return Err(TopologyError::invalid("DB_HOST", "host must not be empty"));
        }
        if self.port == 0 {
            return Err(TopologyError::invalid("DB_PORT", "port must not be 0"));
        }
        if self.engine_requires_auth() {
            if self.user.is_empty() {
                return Err(TopologyError::invalid(
                    "DB_USER",
                    format!("engine '{}' requires a database user", self.engine),
                ));
            }
            if self.password.is_empty() {
                return Err(TopologyError::invalid(
                    "DB_PASSWORD",
                    format!("engine '{}' requires a database password", self.engine),
                ));
            }
        }
        Ok(())
    }
}
