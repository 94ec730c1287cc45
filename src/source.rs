//! Variable sources for descriptor loading
//!
//! The descriptor reads its fields through a `VarSource` so the same loading
//! path serves the process environment in deployments and plain maps in tests.

use std::collections::HashMap;
use std::env;

/// Read-only source of named configuration variables
pub trait VarSource {
    fn get(&self, key: &str) -> Option<String>;

    /// Return the first key in `keys` that resolves to a value.
    ///
    /// Used for legacy unprefixed fallbacks (e.g. `SECRET_KEY` when
    /// `TOPOLOGY_SECRET_KEY` is unset).
    fn get_first(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.get(k))
    }
}

/// The process environment
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl VarSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}
