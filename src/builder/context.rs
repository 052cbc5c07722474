//! Builder for constructing contexts.

use crate::builder::error::BuildError;
use crate::context::{Context, SharedContext};
use crate::core::{Machine, Policy, State};
use crate::registry::Registry;

/// Builder for constructing contexts with a fluent API.
///
/// # Example
///
/// ```
/// use statecraft::builder::ContextBuilder;
/// use statecraft::core::Policy;
/// use statecraft::machines::file::{FileMachine, FileState};
///
/// let file = ContextBuilder::<FileMachine>::new()
///     .policy(Policy::Strict)
///     .build()
///     .unwrap();
///
/// assert_eq!(file.state(), FileState::Closed);
/// assert_eq!(file.policy(), Policy::Strict);
/// ```
pub struct ContextBuilder<M: Machine> {
    initial: Option<M::State>,
    policy: Policy,
}

impl<M: Machine> ContextBuilder<M> {
    /// Create a new builder. Without further calls it builds the machine's
    /// default initial state under [`Policy::Lenient`].
    pub fn new() -> Self {
        Self {
            initial: None,
            policy: Policy::default(),
        }
    }

    /// Override the initial state.
    pub fn initial(mut self, state: M::State) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Read `<machine>.initial` and `<machine>.policy` from a registry.
    ///
    /// Absent keys leave the builder unchanged.
    pub fn configure(mut self, registry: &Registry) -> Result<Self, BuildError> {
        let invalid = |source| BuildError::InvalidSetting {
            machine: M::NAME,
            source,
        };

        if let Some(state) = registry
            .try_get_as::<M::State>(&format!("{}.initial", M::NAME))
            .map_err(invalid)?
        {
            self.initial = Some(state);
        }
        if let Some(policy) = registry
            .try_get_as::<Policy>(&format!("{}.policy", M::NAME))
            .map_err(invalid)?
        {
            self.policy = policy;
        }
        Ok(self)
    }

    /// Build a single-owner context.
    pub fn build(self) -> Result<Context<M>, BuildError> {
        let initial = self.initial.unwrap_or_else(M::initial);

        if !M::states().contains(&initial) {
            return Err(BuildError::UnlistedInitialState {
                machine: M::NAME,
                state: initial.label(),
            });
        }

        Ok(Context::with_policy(initial, self.policy))
    }

    /// Build a context that can be shared across threads.
    pub fn build_shared(self) -> Result<SharedContext<M>, BuildError> {
        self.build().map(Context::into_shared)
    }
}

impl<M: Machine> Default for ContextBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}
