//! Transition tables and their dispatch.
//!
//! A [`Machine`] is a single total function from `(state, operation)` to a
//! [`Verdict`], written as one `match`. [`resolve`] turns a verdict into a
//! [`Step`] or an [`IllegalTransition`] under a [`Policy`], and
//! [`verify_total`] walks the whole table collecting every malformed cell.

use super::error::IllegalTransition;
use super::policy::Policy;
use super::state::{Operation, State};
use super::step::Step;
use chrono::Utc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// What a machine decides for one `(state, operation)` cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict<S: State> {
    /// Perform the effect and move to another state
    Move { to: S, effect: String },

    /// Perform the effect and stay in the current state
    Stay { effect: String },

    /// The request is already satisfied; policy decides notice or rejection
    Notice { message: String },

    /// The operation is not valid in this state under any policy
    Reject { reason: String },
}

/// A finite-state transition table.
///
/// Implementors are zero-sized markers; all behaviour lives in associated
/// functions so that the table is fixed at compile time.
pub trait Machine: Send + Sync + 'static {
    type State: State;
    type Operation: Operation;

    /// Short machine name used in logs and errors.
    const NAME: &'static str;

    /// State a freshly constructed context starts in.
    fn initial() -> Self::State;

    /// Every state of the closed set.
    fn states() -> &'static [Self::State];

    /// One representative of every operation, payloads filled with sample data.
    fn sample_operations() -> Vec<Self::Operation>;

    /// The transition function. Must be total over `states()` and every operation.
    fn transition(state: Self::State, operation: &Self::Operation) -> Verdict<Self::State>;
}

/// Dispatch one operation against a state without touching any context.
///
/// Pure apart from reading the clock for [`Step::at`].
pub fn resolve<M: Machine>(
    state: M::State,
    operation: &M::Operation,
    policy: Policy,
) -> Result<Step<M::State>, IllegalTransition> {
    let reject = |reason: String| IllegalTransition {
        machine: M::NAME,
        state: state.label(),
        operation: operation.name(),
        reason,
    };

    let (to, effect, notice) = match M::transition(state, operation) {
        Verdict::Move { to, effect } => (to, effect, false),
        Verdict::Stay { effect } => (state, effect, false),
        Verdict::Notice { message } => match policy {
            Policy::Lenient => (state, message, true),
            Policy::Strict => return Err(reject(message)),
        },
        Verdict::Reject { reason } => return Err(reject(reason)),
    };

    Ok(Step {
        from: state,
        to,
        operation: operation.name().to_string(),
        effect,
        notice,
        at: Utc::now(),
    })
}

/// A malformed cell found by [`verify_total`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableViolation {
    #[error("{machine}: initial state {state} is not listed in states()")]
    UnlistedInitial {
        machine: &'static str,
        state: &'static str,
    },

    #[error("{machine}: sample_operations() is empty")]
    NoOperations { machine: &'static str },

    #[error("{machine}: {state} --{operation}--> {target}, which is not listed in states()")]
    UnlistedTarget {
        machine: &'static str,
        state: &'static str,
        operation: &'static str,
        target: &'static str,
    },

    #[error("{machine}: {state} --{operation}--> {state} is a move to itself, use Stay or Notice")]
    SelfMove {
        machine: &'static str,
        state: &'static str,
        operation: &'static str,
    },

    #[error("{machine}: {state} --{operation}--> has an empty log line")]
    EmptyEffect {
        machine: &'static str,
        state: &'static str,
        operation: &'static str,
    },

    #[error("{machine}: {state} --{operation}--> is rejected without a reason")]
    EmptyReason {
        machine: &'static str,
        state: &'static str,
        operation: &'static str,
    },
}

/// Check every `(state, operation)` cell of a machine, accumulating ALL
/// violations instead of stopping at the first.
pub fn verify_total<M: Machine>() -> Validation<(), NonEmptyVec<TableViolation>> {
    let states = M::states();
    let operations = M::sample_operations();
    let mut checks: Vec<Validation<(), NonEmptyVec<TableViolation>>> = Vec::new();

    let initial = M::initial();
    checks.push(if states.contains(&initial) {
        Validation::success(())
    } else {
        Validation::fail(TableViolation::UnlistedInitial {
            machine: M::NAME,
            state: initial.label(),
        })
    });

    if operations.is_empty() {
        checks.push(Validation::fail(TableViolation::NoOperations {
            machine: M::NAME,
        }));
    }

    for &state in states {
        for operation in &operations {
            checks.push(check_cell::<M>(state, operation, states));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check_cell<M: Machine>(
    state: M::State,
    operation: &M::Operation,
    states: &[M::State],
) -> Validation<(), NonEmptyVec<TableViolation>> {
    let machine = M::NAME;
    let op = operation.name();

    match M::transition(state, operation) {
        Verdict::Move { to, .. } if !states.contains(&to) => {
            Validation::fail(TableViolation::UnlistedTarget {
                machine,
                state: state.label(),
                operation: op,
                target: to.label(),
            })
        }
        Verdict::Move { to, .. } if to == state => Validation::fail(TableViolation::SelfMove {
            machine,
            state: state.label(),
            operation: op,
        }),
        Verdict::Move { effect, .. } | Verdict::Stay { effect } | Verdict::Notice { message: effect }
            if effect.trim().is_empty() =>
        {
            Validation::fail(TableViolation::EmptyEffect {
                machine,
                state: state.label(),
                operation: op,
            })
        }
        Verdict::Reject { reason } if reason.trim().is_empty() => {
            Validation::fail(TableViolation::EmptyReason {
                machine,
                state: state.label(),
                operation: op,
            })
        }
        _ => Validation::success(()),
    }
}
