use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TopologyError};

/// How this node identifies itself to its peers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterIdentity {
    /// Host identifier distinguishing this node within the cluster
    pub host_id: String,
    /// System-wide UUID shared by all nodes of one installation
    pub system_uuid: Uuid,
}

impl ClusterIdentity {
    pub fn validate(&self) -> Result<()> {
        if self.host_id.is_empty() {
            return Err(TopologyError::invalid(
                "CLUSTER_HOST_ID",
                "cluster host id must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_validates() {
        let identity = ClusterIdentity {
            host_id: "node-1".to_string(),
            system_uuid: Uuid::nil(),
        };
        assert!(identity.validate().is_ok());
    }

    #[test]
    fn test_empty_host_id_rejected() {
        let identity = ClusterIdentity {
            host_id: String::new(),
            system_uuid: Uuid::new_v4(),
        };
        assert_eq!(identity.validate().unwrap_err().field(), "CLUSTER_HOST_ID");
    }
}
