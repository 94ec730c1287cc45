use std::env;
use std::path::Path;

use log::{error, info, warn};

use deploy_topology::security::DeploymentMode;
use deploy_topology::source::ProcessEnv;
use deploy_topology::TopologyDescriptor;

/// Preflight check: load the deployment topology, validate it for the active
/// mode and print a secret-free summary. Exits non-zero on any configuration
/// error so init systems and CI can gate on it.
fn main() {
    // Initialize env
    match dotenvy::dotenv() {
        Ok(_) => info!("Environment variables loaded from .env file"),
        Err(e) => warn!("No .env file loaded: {}", e),
    };

    // Initialize logging
    env_logger::init();

    let mode = DeploymentMode::detect(&ProcessEnv);
    info!("Deployment mode: {:?}", mode);

    // Optional first argument: a JSON descriptor file instead of the environment
    let descriptor = match env::args().nth(1) {
        Some(path) => TopologyDescriptor::from_json_file(Path::new(&path), mode),
        None => TopologyDescriptor::from_env(mode),
    };

    let descriptor = match descriptor {
        Ok(d) => d,
        Err(e) => {
            error!("Topology check failed: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Database: {} '{}' on {}:{} (atomic requests: {})",
        descriptor.database.engine,
        descriptor.database.name,
        descriptor.database.host,
        descriptor.database.port,
        descriptor.database.atomic_requests
    );
    info!("Broker: {}", descriptor.broker.broker_url);
    info!("Result backend: {}", descriptor.broker.result_backend_url);
    for (tier, spec) in &descriptor.cache {
        info!(
            "Cache tier '{}': {} at {}:{} db {}",
            tier, spec.backend, spec.location.host, spec.location.port, spec.location.db_index
        );
    }
    let hosts: Vec<String> = descriptor
        .channel_layer
        .hosts
        .iter()
        .map(|h| h.to_string())
        .collect();
    info!(
        "Channel layer: {} via [{}], capacity {}, expiry {}s",
        descriptor.channel_layer.backend,
        hosts.join(", "),
        descriptor.channel_layer.capacity,
        descriptor.channel_layer.expiry_seconds
    );
    info!(
        "Cluster node '{}' (system {})",
        descriptor.cluster.host_id, descriptor.cluster.system_uuid
    );
    info!("Allowed hosts: {}", descriptor.security.allowed_hosts.join(", "));

    info!("Topology check passed");
}
