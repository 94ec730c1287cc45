// Fundamental deployment defaults, mirroring a stock single-node install
pub const DEFAULT_DB_ENGINE: &str = "postgresql";
pub const DEFAULT_DB_NAME: &str = "platform";
pub const DEFAULT_DB_USER: &str = "platform";
pub const DEFAULT_DB_HOST: &str = "postgres";
pub const DEFAULT_DB_PORT: u16 = 5432;

// Redis-backed services (broker, caches, channel layer)
pub const DEFAULT_BROKER_URL: &str = "redis://redis:6379/0";
pub const DEFAULT_CACHE_DEFAULT_URL: &str = "redis://redis:6379/1";
pub const DEFAULT_CACHE_EPHEMERAL_URL: &str = "redis://redis:6379/2";
pub const DEFAULT_CACHE_BACKEND: &str = "redis";
pub const DEFAULT_CACHE_CLIENT_CLASS: &str = "default";

// Channel layer configuration constants
pub const DEFAULT_CHANNEL_BACKEND: &str = "redis-channel-layer";
pub const DEFAULT_CHANNEL_HOST: &str = "redis";
pub const DEFAULT_CHANNEL_PORT: u16 = 6379;
pub const DEFAULT_CHANNEL_CAPACITY: u32 = 10_000;
pub const DEFAULT_CHANNEL_EXPIRY_SECS: u64 = 10;

// Channel messages expiring faster than this are likely lost before any
// consumer reads them; validation warns but does not reject.
pub const MIN_SANE_CHANNEL_EXPIRY_SECS: u64 = 2;

// Broadcast websocket wiring
pub const DEFAULT_BROADCAST_PORT: u16 = 8052;

// Cluster identity fallback for single-node deployments
pub const DEFAULT_CLUSTER_HOST_ID: &str = "localhost";

pub const DEFAULT_ADMIN_USER: &str = "admin";

// Minimum acceptable secret length in production mode
pub const MIN_SECRET_LENGTH: usize = 16;
