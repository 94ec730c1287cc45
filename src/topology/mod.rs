//! Backing-service specifications for the deployment topology

pub mod broker;
pub mod cache;
pub mod channel;
pub mod cluster;
pub mod database;

// Re-export main components for convenience
pub use broker::BrokerSpec;
pub use cache::{CacheLocation, CacheSpec, CacheTiers};
pub use channel::{ChannelHost, ChannelLayerSpec};
pub use cluster::ClusterIdentity;
pub use database::DatabaseSpec;
