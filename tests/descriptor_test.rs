// Integration tests for descriptor loading and serialization

use std::collections::HashMap;

use uuid::Uuid;

use deploy_topology::security::{BroadcastProtocol, DeploymentMode};
use deploy_topology::TopologyDescriptor;

fn production_vars() -> HashMap<String, String> {
    let entries = [
        ("TOPOLOGY_DB_ENGINE", "postgresql"),
        ("TOPOLOGY_DB_NAME", "automation"),
        ("TOPOLOGY_DB_USER", "automation"),
        ("TOPOLOGY_DB_PASSWORD", "jW3kT8rQ1xZ5vN2m"),
        ("TOPOLOGY_DB_HOST", "db.internal"),
        ("TOPOLOGY_DB_PORT", "5432"),
        ("TOPOLOGY_DB_ATOMIC_REQUESTS", "true"),
        ("TOPOLOGY_BROKER_URL", "redis://queue.internal:6379/0"),
        ("TOPOLOGY_RESULT_BACKEND_URL", "redis://queue.internal:6379/3"),
        ("TOPOLOGY_CACHE_DEFAULT_URL", "redis://queue.internal:6379/1"),
        ("TOPOLOGY_CACHE_EPHEMERAL_URL", "redis://queue.internal:6379/2"),
        ("TOPOLOGY_CHANNEL_HOSTS", "queue.internal:6379"),
        ("TOPOLOGY_CHANNEL_CAPACITY", "10000"),
        ("TOPOLOGY_CHANNEL_EXPIRY_SECS", "10"),
        ("TOPOLOGY_CLUSTER_HOST_ID", "node-1"),
        ("TOPOLOGY_SYSTEM_UUID", "8f14e9a0-3b2c-4d1e-9f6a-7b8c9d0e1f2a"),
        ("TOPOLOGY_SECRET_KEY", "Kx9mP2nQ7rS8tU3vW6xY1zA4bC5dE8fG"),
        ("TOPOLOGY_BROADCAST_SECRET", "a9b8c7d6e5f4g3h2i1j0k9l8m7n6o5p4"),
        ("TOPOLOGY_BROADCAST_PROTOCOL", "https"),
        ("TOPOLOGY_BROADCAST_PORT", "8052"),
        ("TOPOLOGY_ALLOWED_HOSTS", "platform.example.com,*.platform.example.com"),
        ("TOPOLOGY_ADMIN_USER", "admin"),
        ("TOPOLOGY_ADMIN_PASSWORD", "tr9-Vq2MhW8pZl4K"),
    ];
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn fully_specified_production_environment_loads() {
    let descriptor =
        TopologyDescriptor::load(&production_vars(), DeploymentMode::Production).unwrap();

    assert_eq!(descriptor.database.name, "automation");
    assert_eq!(descriptor.database.host, "db.internal");
    assert_eq!(descriptor.broker.broker_url, "redis://queue.internal:6379/0");
    assert_eq!(
        descriptor.broker.result_backend_url,
        "redis://queue.internal:6379/3"
    );
    assert_eq!(descriptor.cache["default"].location.db_index, 1);
    assert_eq!(descriptor.cache["ephemeral"].location.db_index, 2);
    assert_eq!(descriptor.channel_layer.hosts[0].host, "queue.internal");
    assert_eq!(descriptor.cluster.host_id, "node-1");
    assert_eq!(
        descriptor.cluster.system_uuid,
        Uuid::parse_str("8f14e9a0-3b2c-4d1e-9f6a-7b8c9d0e1f2a").unwrap()
    );
    assert_eq!(
        descriptor.security.broadcast_protocol,
        BroadcastProtocol::Https
    );
    assert_eq!(descriptor.security.allowed_hosts.len(), 2);
    assert_eq!(descriptor.bootstrap_admin.username, "admin");
}

#[test]
fn json_round_trip_preserves_every_field() {
    let descriptor =
        TopologyDescriptor::load(&production_vars(), DeploymentMode::Production).unwrap();

    let serialized = descriptor.to_json_string().unwrap();
    let reloaded =
        TopologyDescriptor::from_json_str(&serialized, DeploymentMode::Production).unwrap();

    assert_eq!(descriptor, reloaded);
}

#[test]
fn json_form_is_validated_like_the_environment_form() {
    let descriptor =
        TopologyDescriptor::load(&production_vars(), DeploymentMode::Development).unwrap();

    let mut serialized = descriptor.to_json_string().unwrap();
    serialized = serialized.replace("\"capacity\": 10000", "\"capacity\": 0");

    let err = TopologyDescriptor::from_json_str(&serialized, DeploymentMode::Development)
        .unwrap_err();
    assert_eq!(err.field(), "CHANNEL_CAPACITY");
}

#[test]
fn descriptor_file_round_trip() {
    let descriptor =
        TopologyDescriptor::load(&production_vars(), DeploymentMode::Production).unwrap();

    let dir = std::env::temp_dir().join("deploy-topology-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("topology.json");
    std::fs::write(&path, descriptor.to_json_string().unwrap()).unwrap();

    let reloaded =
        TopologyDescriptor::from_json_file(&path, DeploymentMode::Production).unwrap();
    assert_eq!(descriptor, reloaded);

    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_descriptor_file_is_a_configuration_error() {
    let err = TopologyDescriptor::from_json_file(
        std::path::Path::new("/nonexistent/topology.json"),
        DeploymentMode::Development,
    )
    .unwrap_err();
    assert_eq!(err.field(), "descriptor");
}

#[test]
fn debug_output_never_contains_secret_material() {
    let descriptor =
        TopologyDescriptor::load(&production_vars(), DeploymentMode::Production).unwrap();

    let rendered = format!("{:?}", descriptor);
    assert!(!rendered.contains("Kx9mP2nQ7rS8tU3vW6xY1zA4bC5dE8fG"));
    assert!(!rendered.contains("jW3kT8rQ1xZ5vN2m"));
    assert!(!rendered.contains("a9b8c7d6e5f4g3h2i1j0k9l8m7n6o5p4"));
    assert!(!rendered.contains("tr9-Vq2MhW8pZl4K"));
}
