use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    // A single field is missing, malformed or insecure for the active mode
    ConfigurationError { field: String, reason: String },

    // Two fields that are individually valid contradict an invariant
    ConfigurationConflict { field: String, reason: String },
}

impl TopologyError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        TopologyError::ConfigurationError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn conflict(field: &str, reason: impl Into<String>) -> Self {
        TopologyError::ConfigurationConflict {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, for operator-facing diagnostics.
    pub fn field(&self) -> &str {
        match self {
            Self::ConfigurationError { field, .. } => field,
            Self::ConfigurationConflict { field, .. } => field,
        }
    }
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationError { field, reason } => {
                write!(f, "Configuration error in {}: {}", field, reason)
            }
            Self::ConfigurationConflict { field, reason } => {
                write!(f, "Configuration conflict in {}: {}", field, reason)
            }
        }
    }
}

impl Error for TopologyError {}

// Generic result type for descriptor loading and validation
pub type Result<T> = std::result::Result<T, TopologyError>;
