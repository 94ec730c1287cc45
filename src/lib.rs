//! Deploy Topology - deployment wiring for clustered automation platforms
//!
//! This library loads, validates and exposes the topology descriptor that
//! tells a platform process where its database, caches, message broker and
//! channel layer live and how the node identifies itself within a cluster.
//! Validation runs at load time so a process never accepts traffic with
//! insecure or contradictory settings.

pub mod constants;
pub mod descriptor;
pub mod error;
pub mod security;
pub mod source;
pub mod topology;

// Re-export main components
pub use descriptor::TopologyDescriptor;
pub use error::{Result, TopologyError};
pub use security::DeploymentMode;
pub use source::{ProcessEnv, VarSource};
