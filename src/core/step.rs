//! Record of a single accepted operation.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one accepted call on a context.
///
/// A step describes one call only. Contexts do not keep steps around; the
/// caller decides whether to hold on to them.
///
/// # Example
///
/// ```rust
/// use statecraft::machines::file::{File, FileState};
///
/// let mut file = File::new();
/// let step = file.open().unwrap();
///
/// assert_eq!(step.from, FileState::Closed);
/// assert_eq!(step.to, FileState::Open);
/// assert!(step.changed());
/// assert!(!step.notice);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Step<S: State> {
    /// State before the call
    pub from: S,
    /// State after the call (equal to `from` for in-state effects and notices)
    pub to: S,
    /// Name of the operation that produced this step
    pub operation: String,
    /// The log line emitted for this call
    pub effect: String,
    /// True when the call was accepted as a no-op
    pub notice: bool,
    /// When the call was resolved
    pub at: DateTime<Utc>,
}

impl<S: State> Step<S> {
    /// Whether the call moved the context to a different state.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}
