//! # homedash-adapter-storage-noop
//!
//! Inert [`KeyValueStore`]: every read is empty and every write is dropped.
//! Wiring it in keeps the preference flow exercised end to end while the
//! dashboard stays stateless across restarts.
//!
//! ## Dependency rule
//!
//! Depends on `homedash-app` (port traits) and `homedash-domain` only.

use homedash_app::ports::KeyValueStore;
use homedash_domain::error::HomeDashError;

/// Store that remembers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl KeyValueStore for NoopStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, HomeDashError> {
        tracing::trace!(key, "noop store read");
        Ok(None)
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), HomeDashError> {
        tracing::debug!(key, %value, "noop store discarded write");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), HomeDashError> {
        tracing::debug!(key, "noop store discarded remove");
        Ok(())
    }
}
