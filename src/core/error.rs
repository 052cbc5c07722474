//! The one error a transition can produce.

use thiserror::Error;

/// An operation was dispatched in a state that does not allow it.
///
/// Raised synchronously by [`resolve`](crate::core::resolve) and surfaced
/// unchanged by every context. The context's state is never modified when
/// this error is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operation '{operation}' not valid in state {state}: {reason}")]
pub struct IllegalTransition {
    /// Name of the machine that rejected the call, e.g. `"file"`.
    pub machine: &'static str,
    /// Label of the state the context was in.
    pub state: &'static str,
    /// Name of the rejected operation.
    pub operation: &'static str,
    /// Human-readable cause, e.g. `"file locked"`.
    pub reason: String,
}

impl IllegalTransition {
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
