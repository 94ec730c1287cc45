//! Security-sensitive settings: deployment mode, secrets and access control

pub mod access;
pub mod mode;
pub mod secrets;

pub use access::BootstrapAdmin;
pub use mode::DeploymentMode;
pub use secrets::{BroadcastProtocol, SecuritySettings};
