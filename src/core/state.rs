//! State and operation traits.
//!
//! A state is a tag from a small closed set. It carries no per-instance data,
//! so every state is a `Copy` constant and a transition never allocates.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for lifecycle states.
///
/// All methods are pure. States describe the current mode of behaviour of a
/// [`Context`](crate::context::Context) and nothing else.
///
/// # Required Traits
///
/// - `Copy`: states are stateless constant values
/// - `Eq` + `Hash`: states are compared when deciding transitions
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states can be embedded in caller config
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Shut,
///     Ajar,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Shut => "Shut",
///             Self::Ajar => "Ajar",
///         }
///     }
///
///     fn label(&self) -> &'static str {
///         match self {
///             Self::Shut => "SHUT",
///             Self::Ajar => "AJAR",
///         }
///     }
/// }
///
/// assert_eq!(Door::Shut.label(), "SHUT");
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// The variant name, e.g. `"Closed"`.
    fn name(&self) -> &'static str;

    /// The upper-case label callers read back, e.g. `"CLOSED"`.
    fn label(&self) -> &'static str;
}

/// A named request dispatched to a context.
///
/// Operations may carry a payload (`Write(String)`), so they are `Clone`
/// rather than `Copy`.
pub trait Operation: Clone + Debug + Send + Sync {
    /// The operation's name as it appears in logs and errors, e.g. `"write"`.
    fn name(&self) -> &'static str;
}
