//! Storage port — a key/value collaborator for optional persistence.
//!
//! The core never assumes durability: a store may forget everything, and
//! the shipped adapter does exactly that.

use std::future::Future;

use homedash_domain::error::HomeDashError;

/// Asynchronous key/value store holding JSON values.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, HomeDashError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: serde_json::Value,
    ) -> impl Future<Output = Result<(), HomeDashError>> + Send;

    /// Forget the value stored under `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), HomeDashError>> + Send;
}

impl<T: KeyValueStore + Send + Sync> KeyValueStore for std::sync::Arc<T> {
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, HomeDashError>> + Send {
        (**self).get(key)
    }

    fn set(
        &self,
        key: &str,
        value: serde_json::Value,
    ) -> impl Future<Output = Result<(), HomeDashError>> + Send {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), HomeDashError>> + Send {
        (**self).remove(key)
    }
}
