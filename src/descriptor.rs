//! Deployment topology descriptor
//!
//! Single source of truth for how a platform process reaches its backing
//! services (database, caches, broker, channel layer) and identifies itself
//! within a cluster. Loaded once at process start, validated before any
//! dependent subsystem runs, then passed around by reference; there is no
//! process-wide singleton and no mutation after load.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    DEFAULT_ADMIN_USER, DEFAULT_BROADCAST_PORT, DEFAULT_BROKER_URL, DEFAULT_CACHE_BACKEND,
    DEFAULT_CACHE_CLIENT_CLASS, DEFAULT_CACHE_DEFAULT_URL, DEFAULT_CACHE_EPHEMERAL_URL,
    DEFAULT_CHANNEL_BACKEND, DEFAULT_CHANNEL_CAPACITY, DEFAULT_CHANNEL_EXPIRY_SECS,
    DEFAULT_CHANNEL_HOST, DEFAULT_CHANNEL_PORT, DEFAULT_CLUSTER_HOST_ID, DEFAULT_DB_ENGINE,
    DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PORT, DEFAULT_DB_USER,
};
use crate::error::{Result, TopologyError};
use crate::security::{BootstrapAdmin, BroadcastProtocol, DeploymentMode, SecuritySettings};
use crate::source::{ProcessEnv, VarSource};
use crate::topology::{
    cache, BrokerSpec, CacheSpec, CacheTiers, ChannelHost, ChannelLayerSpec, ClusterIdentity,
    DatabaseSpec,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyDescriptor {
    pub database: DatabaseSpec,
    pub broker: BrokerSpec,
    pub cache: CacheTiers,
    pub channel_layer: ChannelLayerSpec,
    pub cluster: ClusterIdentity,
    pub security: SecuritySettings,
    pub bootstrap_admin: BootstrapAdmin,
}

impl TopologyDescriptor {
    /// Load from the process environment and validate for `mode`.
    pub fn from_env(mode: DeploymentMode) -> Result<Self> {
        Self::load(&ProcessEnv, mode)
    }

    /// Load from an arbitrary variable source and validate for `mode`.
    ///
    /// Non-secret fields fall back to the stock single-node defaults in
    /// `constants`; secrets and the admin password have no default and must
    /// be supplied. A variable that is present but unparseable is a
    /// configuration error naming the variable, never a silent default.
    pub fn load(source: &dyn VarSource, mode: DeploymentMode) -> Result<Self> {
        let descriptor = Self {
            database: load_database(source)?,
            broker: load_broker(source)?,
            cache: load_cache_tiers(source)?,
            channel_layer: load_channel_layer(source)?,
            cluster: load_cluster(source)?,
            security: load_security(source)?,
            bootstrap_admin: load_admin(source)?,
        };
        descriptor.validate(mode)?;
        Ok(descriptor)
    }

    /// Parse a serialized descriptor and validate for `mode`.
    pub fn from_json_str(raw: &str, mode: DeploymentMode) -> Result<Self> {
        let descriptor: Self = serde_json::from_str(raw)
            .map_err(|e| TopologyError::invalid("descriptor", format!("invalid JSON: {}", e)))?;
        descriptor.validate(mode)?;
        Ok(descriptor)
    }

    /// Read a descriptor file from disk and validate for `mode`.
    pub fn from_json_file(path: &Path, mode: DeploymentMode) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            TopologyError::invalid(
                "descriptor",
                format!("cannot read '{}': {}", path.display(), e),
            )
        })?;
        Self::from_json_str(&raw, mode)
    }

    /// Serialize back to the JSON source representation.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TopologyError::invalid("descriptor", format!("serialization failed: {}", e)))
    }

    /// Run the full validation pass. Fails fast on the first violation; the
    /// returned error names the offending field for the operator.
    pub fn validate(&self, mode: DeploymentMode) -> Result<()> {
        self.database.validate()?;
        self.broker.validate()?;
        for (tier, spec) in &self.cache {
            spec.validate(tier)?;
        }
        cache::check_tier_isolation(&self.cache)?;
        self.channel_layer.validate()?;
        self.cluster.validate()?;
        self.security.validate(mode)?;
        self.bootstrap_admin.validate(mode)?;
        Ok(())
    }
}

fn get_or(source: &dyn VarSource, keys: &[&str], default: &str) -> String {
    source
        .get_first(keys)
        .unwrap_or_else(|| default.to_string())
}

fn require(source: &dyn VarSource, keys: &[&str]) -> Result<String> {
    source.get_first(keys).ok_or_else(|| {
        TopologyError::invalid(
            keys[keys.len() - 1],
            format!("required variable {} is not set", keys.join(" / ")),
        )
    })
}

fn parse_or<T: FromStr>(source: &dyn VarSource, key: &str, default: T) -> Result<T> {
    match source.get(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| TopologyError::invalid(key, format!("cannot parse value '{}'", raw))),
    }
}

fn parse_bool_or(source: &dyn VarSource, key: &str, default: bool) -> Result<bool> {
    match source.get(key) {
        None => Ok(default),
        Some(raw) => match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(TopologyError::invalid(
                key,
                format!("cannot parse boolean value '{}'", raw),
            )),
        },
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn load_database(source: &dyn VarSource) -> Result<DatabaseSpec> {
    Ok(DatabaseSpec {
        engine: get_or(source, &["TOPOLOGY_DB_ENGINE"], DEFAULT_DB_ENGINE),
        name: get_or(source, &["TOPOLOGY_DB_NAME"], DEFAULT_DB_NAME),
        user: get_or(source, &["TOPOLOGY_DB_USER"], DEFAULT_DB_USER),
        // No default: an authenticated engine with an empty password is
        // rejected by validation
        password: get_or(source, &["TOPOLOGY_DB_PASSWORD"], ""),
        host: get_or(source, &["TOPOLOGY_DB_HOST"], DEFAULT_DB_HOST),
        port: parse_or(source, "TOPOLOGY_DB_PORT", DEFAULT_DB_PORT)?,
        atomic_requests: parse_bool_or(source, "TOPOLOGY_DB_ATOMIC_REQUESTS", true)?,
    })
}

fn load_broker(source: &dyn VarSource) -> Result<BrokerSpec> {
    let broker_url = get_or(
        source,
        &["TOPOLOGY_BROKER_URL", "BROKER_URL"],
        DEFAULT_BROKER_URL,
    );
    // The result backend shares the broker store unless wired elsewhere
    let result_backend_url = get_or(
        source,
        &["TOPOLOGY_RESULT_BACKEND_URL", "RESULT_BACKEND_URL"],
        &broker_url,
    );
    Ok(BrokerSpec {
        broker_url,
        result_backend_url,
    })
}

fn load_cache_tiers(source: &dyn VarSource) -> Result<CacheTiers> {
    let backend = get_or(source, &["TOPOLOGY_CACHE_BACKEND"], DEFAULT_CACHE_BACKEND);
    let client_class = get_or(
        source,
        &["TOPOLOGY_CACHE_CLIENT_CLASS"],
        DEFAULT_CACHE_CLIENT_CLASS,
    );

    let mut tiers = CacheTiers::new();
    for (tier, var, default_url) in [
        ("default", "TOPOLOGY_CACHE_DEFAULT_URL", DEFAULT_CACHE_DEFAULT_URL),
        (
            "ephemeral",
            "TOPOLOGY_CACHE_EPHEMERAL_URL",
            DEFAULT_CACHE_EPHEMERAL_URL,
        ),
    ] {
        let url = get_or(source, &[var], default_url);
        tiers.insert(
            tier.to_string(),
            CacheSpec {
                backend: backend.clone(),
                location: cache::CacheLocation::parse(var, &url)?,
                client_class: client_class.clone(),
            },
        );
    }
    Ok(tiers)
}

fn load_channel_layer(source: &dyn VarSource) -> Result<ChannelLayerSpec> {
    let hosts = match source.get("TOPOLOGY_CHANNEL_HOSTS") {
        Some(raw) => split_list(&raw)
            .iter()
            .map(|pair| ChannelHost::parse("TOPOLOGY_CHANNEL_HOSTS", pair))
            .collect::<Result<Vec<_>>>()?,
        None => vec![ChannelHost {
            host: DEFAULT_CHANNEL_HOST.to_string(),
            port: DEFAULT_CHANNEL_PORT,
        }],
    };

    Ok(ChannelLayerSpec {
        backend: get_or(source, &["TOPOLOGY_CHANNEL_BACKEND"], DEFAULT_CHANNEL_BACKEND),
        hosts,
        capacity: parse_or(source, "TOPOLOGY_CHANNEL_CAPACITY", DEFAULT_CHANNEL_CAPACITY)?,
        expiry_seconds: parse_or(
            source,
            "TOPOLOGY_CHANNEL_EXPIRY_SECS",
            DEFAULT_CHANNEL_EXPIRY_SECS,
        )?,
    })
}

fn load_cluster(source: &dyn VarSource) -> Result<ClusterIdentity> {
    let raw_uuid = get_or(
        source,
        &["TOPOLOGY_SYSTEM_UUID", "SYSTEM_UUID"],
        "00000000-0000-0000-0000-000000000000",
    );
    let system_uuid = Uuid::parse_str(&raw_uuid)
        .map_err(|_| TopologyError::invalid("SYSTEM_UUID", format!("'{}' is not a UUID", raw_uuid)))?;

    Ok(ClusterIdentity {
        host_id: get_or(
            source,
            &["TOPOLOGY_CLUSTER_HOST_ID", "CLUSTER_HOST_ID"],
            DEFAULT_CLUSTER_HOST_ID,
        ),
        system_uuid,
    })
}

fn load_security(source: &dyn VarSource) -> Result<SecuritySettings> {
    let protocol_raw = get_or(source, &["TOPOLOGY_BROADCAST_PROTOCOL"], "http");
    let allowed_hosts = match source.get_first(&["TOPOLOGY_ALLOWED_HOSTS", "ALLOWED_HOSTS"]) {
        // Wildcard default only survives validation in development mode
        None => vec!["*".to_string()],
        Some(raw) => split_list(&raw),
    };

    Ok(SecuritySettings {
        secret_key: require(source, &["TOPOLOGY_SECRET_KEY", "SECRET_KEY"])?,
        broadcast_secret: require(
            source,
            &["TOPOLOGY_BROADCAST_SECRET", "BROADCAST_WEBSOCKET_SECRET"],
        )?,
        broadcast_protocol: BroadcastProtocol::parse("TOPOLOGY_BROADCAST_PROTOCOL", &protocol_raw)?,
        broadcast_port: parse_or(source, "TOPOLOGY_BROADCAST_PORT", DEFAULT_BROADCAST_PORT)?,
        allowed_hosts,
    })
}

fn load_admin(source: &dyn VarSource) -> Result<BootstrapAdmin> {
    Ok(BootstrapAdmin {
        username: get_or(source, &["TOPOLOGY_ADMIN_USER"], DEFAULT_ADMIN_USER),
        password: require(source, &["TOPOLOGY_ADMIN_PASSWORD"])?,
    })
}
