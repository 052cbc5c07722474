//! Build errors for context builders.

use crate::registry::RegistryError;
use thiserror::Error;

/// Errors that can occur when building contexts.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state {state} is not one of the {machine} machine's states")]
    UnlistedInitialState {
        machine: &'static str,
        state: &'static str,
    },

    #[error("Invalid setting for the {machine} machine: {source}")]
    InvalidSetting {
        machine: &'static str,
        #[source]
        source: RegistryError,
    },
}
