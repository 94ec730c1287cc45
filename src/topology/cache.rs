use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, TopologyError};

/// Named cache tiers ("default", "ephemeral", ...), ordered for stable output
pub type CacheTiers = BTreeMap<String, CacheSpec>;

/// Location of one cache tier within a key-value store
///
/// `db_index` is the logical database partition isolating this tier from
/// other tiers sharing the same backing instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheLocation {
    pub host: String,
    pub port: u16,
    pub db_index: u32,
}

impl CacheLocation {
    /// Parse a `redis://host:port/db` style URL into a location.
    pub fn parse(field: &str, raw: &str) -> Result<Self> {
        let url = Url::parse(raw)
            .map_err(|e| TopologyError::invalid(field, format!("invalid cache URL '{}': {}", raw, e)))?;

        let host = url
            .host_str()
            .ok_or_else(|| TopologyError::invalid(field, format!("cache URL '{}' has no host", raw)))?
            .to_string();

        let port = url
            .port()
            .ok_or_else(|| TopologyError::invalid(field, format!("cache URL '{}' has no port", raw)))?;

        // Path component carries the logical database index, e.g. "/1"
        let db_index = url
            .path()
            .trim_start_matches('/')
            .parse::<u32>()
            .map_err(|_| {
                TopologyError::invalid(
                    field,
                    format!("cache URL '{}' has no numeric database index", raw),
                )
            })?;

        Ok(Self { host, port, db_index })
    }
}

/// One cache tier's backend wiring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSpec {
    pub backend: String,
    pub location: CacheLocation,
    pub client_class: String,
}

impl CacheSpec {
    pub fn validate(&self, tier: &str) -> Result<()> {
        let field = format!("CACHE[{}]", tier);
        if self.backend.is_empty() {
            return Err(TopologyError::invalid(&field, "backend must not be empty"));
        }
        if self.location.host.is_empty() {
            return Err(TopologyError::invalid(&field, "location host must not be empty"));
        }
        if self.location.port == 0 {
            return Err(TopologyError::invalid(&field, "location port must not be 0"));
        }
        Ok(())
    }
}

/// Reject two tiers claiming the same logical database on one backing store.
///
/// Tiers on distinct host:port pairs never collide; tiers sharing an instance
/// must use distinct db indices or their keys would interleave.
pub fn check_tier_isolation(tiers: &CacheTiers) -> Result<()> {
    let mut seen: HashMap<(String, u16, u32), &str> = HashMap::new();

    for (tier, spec) in tiers {
        let key = (
            spec.location.host.clone(),
            spec.location.port,
            spec.location.db_index,
        );
        if let Some(other) = seen.get(&key) {
            return Err(TopologyError::conflict(
                &format!("CACHE[{}]", tier),
                format!(
                    "tier '{}' and tier '{}' both use db index {} on {}:{}",
                    tier, other, spec.location.db_index, spec.location.host, spec.location.port
                ),
            ));
        }
        seen.insert(key, tier);
    }
    Ok(())
}
