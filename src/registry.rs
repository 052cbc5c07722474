//! Explicitly passed settings registry.
//!
//! A `Registry` is an ordinary value: whoever needs one constructs it and
//! hands it (usually as `Arc<Registry>`) to the code that reads it. There is
//! no global accessor, so the single-instance lifetime belongs to the caller.
//!
//! # Example
//!
//! ```rust
//! use statecraft::registry::Registry;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(Registry::new());
//! registry.set("file.policy", "strict").unwrap();
//!
//! let reader = Arc::clone(&registry);
//! let policy: String = reader.get_as("file.policy").unwrap();
//! assert_eq!(policy, "strict");
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

/// Errors from typed registry access.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("No setting named '{key}'")]
    Missing { key: String },

    #[error("Setting '{key}' could not be encoded: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Setting '{key}' has the wrong shape: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed settings, readable from many threads at once.
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a setting, returning the previous value if there was one.
    pub fn set<T: Serialize>(
        &self,
        key: impl Into<String>,
        value: T,
    ) -> Result<Option<Value>, RegistryError> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|source| RegistryError::Encode {
            key: key.clone(),
            source,
        })?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.insert(key, value))
    }

    /// Raw value of a setting.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Typed value of a setting that must be present.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, RegistryError> {
        self.try_get_as(key)?.ok_or_else(|| RegistryError::Missing {
            key: key.to_string(),
        })
    }

    /// Typed value of an optional setting.
    ///
    /// Absent keys yield `Ok(None)`; present keys with the wrong shape are
    /// still an error.
    pub fn try_get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RegistryError> {
        self.get(key)
            .map(|value| {
                serde_json::from_value(value).map_err(|source| RegistryError::Decode {
                    key: key.to_string(),
                    source,
                })
            })
            .transpose()
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
