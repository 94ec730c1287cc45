use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_SANE_CHANNEL_EXPIRY_SECS;
use crate::error::{Result, TopologyError};

/// One pub/sub endpoint of the channel layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelHost {
    pub host: String,
    pub port: u16,
}

impl ChannelHost {
    /// Parse a `host:port` pair as written in `TOPOLOGY_CHANNEL_HOSTS`.
    pub fn parse(field: &str, raw: &str) -> Result<Self> {
        let (host, port) = raw.rsplit_once(':').ok_or_else(|| {
            TopologyError::invalid(field, format!("'{}' is not a host:port pair", raw))
        })?;

        let port = port.parse::<u16>().map_err(|_| {
            TopologyError::invalid(field, format!("'{}' has an invalid port", raw))
        })?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for ChannelHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Pub/sub transport fanning real-time messages out across process instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLayerSpec {
    pub backend: String,
    pub hosts: Vec<ChannelHost>,
    /// Maximum buffered messages per channel
    pub capacity: u32,
    /// Seconds before an unread message is dropped
    pub expiry_seconds: u64,
}

impl ChannelLayerSpec {
    pub fn validate(&self) -> Result<()> {
        if self.backend.is_empty() {
            return Err(TopologyError::invalid(
                "CHANNEL_BACKEND",
                "backend must not be empty",
            ));
        }
        if self.hosts.is_empty() {
            return Err(TopologyError::invalid(
                "CHANNEL_HOSTS",
                "at least one channel host is required",
            ));
        }
        for host in &self.hosts {
            if host.host.is_empty() {
                return Err(TopologyError::invalid(
                    "CHANNEL_HOSTS",
                    "channel host name must not be empty",
                ));
            }
            if host.port == 0 {
                return Err(TopologyError::invalid(
                    "CHANNEL_HOSTS",
                    format!("channel host '{}' has port 0", host.host),
                ));
            }
        }
        if self.capacity == 0 {
            return Err(TopologyError::invalid(
                "CHANNEL_CAPACITY",
                "capacity must be positive",
            ));
        }
        if self.expiry_seconds == 0 {
            return Err(TopologyError::invalid(
                "CHANNEL_EXPIRY_SECS",
                "expiry must be positive",
            ));
        }
        if self.expiry_seconds < MIN_SANE_CHANNEL_EXPIRY_SECS {
            warn!(
                "Channel expiry of {}s is below {}s; slow consumers will lose messages",
                self.expiry_seconds, MIN_SANE_CHANNEL_EXPIRY_SECS
            );
        }
        Ok(())
    }
}
