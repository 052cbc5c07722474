//! Contexts that own a current state and dispatch operations to it.

use crate::core::{resolve, IllegalTransition, Machine, Policy, State, Step};
use std::marker::PhantomData;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Single-owner context.
///
/// Transitions take `&mut self`, so a `Context` is confined to whoever owns
/// it. Use [`SharedContext`] to share one across threads.
#[derive(Debug)]
pub struct Context<M: Machine> {
    current: M::State,
    policy: Policy,
    _machine: PhantomData<M>,
}

impl<M: Machine> Context<M> {
    /// Create a context in the machine's default initial state.
    pub fn new() -> Self {
        Self::with_state(M::initial())
    }

    /// Create a context in an explicit state.
    pub fn with_state(state: M::State) -> Self {
        Self::with_policy(state, Policy::default())
    }

    pub(crate) fn with_policy(state: M::State, policy: Policy) -> Self {
        Self {
            current: state,
            policy,
            _machine: PhantomData,
        }
    }

    /// Dispatch one operation.
    ///
    /// On success the context moves to `step.to`. On error the state is
    /// left untouched.
    pub fn apply(&mut self, operation: M::Operation) -> Result<Step<M::State>, IllegalTransition> {
        let outcome = resolve::<M>(self.current, &operation, self.policy);
        trace_outcome::<M>(&outcome);
        let step = outcome?;
        self.current = step.to;
        Ok(step)
    }

    /// Get current state (pure)
    pub fn state(&self) -> M::State {
        self.current
    }

    /// Upper-case label of the current state, e.g. `"CLOSED"`.
    pub fn label(&self) -> &'static str {
        self.current.label()
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Move this context behind a mutex so it can be shared across threads.
    pub fn into_shared(self) -> SharedContext<M> {
        SharedContext {
            current: Mutex::new(self.current),
            policy: self.policy,
            _machine: PhantomData,
        }
    }
}

impl<M: Machine> Default for Context<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Machine> Clone for Context<M> {
    fn clone(&self) -> Self {
        Self::with_policy(self.current, self.policy)
    }
}

/// Context whose current state is guarded by a mutex.
///
/// The lock is held across the whole read-decide-write of a transition, so
/// concurrent callers never act on a stale state. Wrap in an `Arc` to share.
#[derive(Debug)]
pub struct SharedContext<M: Machine> {
    current: Mutex<M::State>,
    policy: Policy,
    _machine: PhantomData<M>,
}

impl<M: Machine> SharedContext<M> {
    pub fn new() -> Self {
        Context::<M>::new().into_shared()
    }

    pub fn with_state(state: M::State) -> Self {
        Context::<M>::with_state(state).into_shared()
    }

    /// Dispatch one operation while holding the state lock.
    ///
    /// The outcome is traced once the lock has been released.
    pub fn apply(&self, operation: M::Operation) -> Result<Step<M::State>, IllegalTransition> {
        let outcome = {
            // The guarded value is a Copy tag and always valid, so a poisoned
            // lock is safe to recover.
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            let outcome = resolve::<M>(*current, &operation, self.policy);
            if let Ok(step) = &outcome {
                *current = step.to;
            }
            outcome
        };

        // Traced outside the lock.
        trace_outcome::<M>(&outcome);
        outcome
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> M::State {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn label(&self) -> &'static str {
        self.state().label()
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Take the context back out of the mutex.
    pub fn into_inner(self) -> Context<M> {
        let state = self
            .current
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        Context::with_policy(state, self.policy)
    }
}

impl<M: Machine> Default for SharedContext<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn trace_outcome<M: Machine>(outcome: &Result<Step<M::State>, IllegalTransition>) {
    match outcome {
        Ok(step) if step.changed() => info!(
            machine = M::NAME,
            from = step.from.label(),
            to = step.to.label(),
            operation = %step.operation,
            "{}",
            step.effect
        ),
        Ok(step) if step.notice => debug!(
            machine = M::NAME,
            state = step.to.label(),
            operation = %step.operation,
            notice = true,
            "{}",
            step.effect
        ),
        Ok(step) => debug!(
            machine = M::NAME,
            state = step.to.label(),
            operation = %step.operation,
            "{}",
            step.effect
        ),
        Err(err) => warn!(
            machine = err.machine,
            state = err.state,
            operation = err.operation,
            reason = %err.reason,
            "operation rejected"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Operation, Verdict};
    use crate::state_enum;
    use std::sync::Arc;

    state_enum! {
        enum Job {
            Queued => "QUEUED",
            Running => "RUNNING",
            Done => "DONE",
        }
    }

    #[derive(Clone, Debug)]
    enum JobOp {
        Start,
        Finish,
    }

    impl Operation for JobOp {
        fn name(&self) -> &'static str {
            match self {
                Self::Start => "start",
                Self::Finish => "finish",
            }
        }
    }

    struct JobMachine;

    impl Machine for JobMachine {
        type State = Job;
        type Operation = JobOp;

        const NAME: &'static str = "job";

        fn initial() -> Job {
            Job::Queued
        }

        fn states() -> &'static [Job] {
            Job::ALL
        }

        fn sample_operations() -> Vec<JobOp> {
            vec![JobOp::Start, JobOp::Finish]
        }

        fn transition(state: Job, operation: &JobOp) -> Verdict<Job> {
            match (state, operation) {
                (Job::Queued, JobOp::Start) => Verdict::Move {
                    to: Job::Running,
                    effect: "job started".to_string(),
                },
                (Job::Running, JobOp::Start) => Verdict::Notice {
                    message: "job already running".to_string(),
                },
                (Job::Running, JobOp::Finish) => Verdict::Move {
                    to: Job::Done,
                    effect: "job finished".to_string(),
                },
                (Job::Queued, JobOp::Finish) => Verdict::Reject {
                    reason: "job not started".to_string(),
                },
                (Job::Done, _) => Verdict::Reject {
                    reason: "job done".to_string(),
                },
            }
        }
    }

    #[test]
    fn new_context_starts_in_initial_state() {
        let ctx = Context::<JobMachine>::new();
        assert_eq!(ctx.state(), Job::Queued);
        assert_eq!(ctx.label(), "QUEUED");
        assert_eq!(ctx.policy(), Policy::Lenient);
    }

    #[test]
    fn apply_moves_through_states() {
        let mut ctx = Context::<JobMachine>::new();

        ctx.apply(JobOp::Start).unwrap();
        assert_eq!(ctx.state(), Job::Running);

        let step = ctx.apply(JobOp::Finish).unwrap();
        assert_eq!(step.from, Job::Running);
        assert_eq!(ctx.state(), Job::Done);
        assert_eq!(ctx.label(), "DONE");
    }

    #[test]
    fn rejection_leaves_state_untouched() {
        let mut ctx = Context::<JobMachine>::new();

        let err = ctx.apply(JobOp::Finish).unwrap_err();
        assert_eq!(err.reason(), "job not started");
        assert_eq!(ctx.state(), Job::Queued);
    }

    #[test]
    fn strict_policy_rejects_notices() {
        let mut ctx = Context::<JobMachine>::with_policy(Job::Running, Policy::Strict);

        let err = ctx.apply(JobOp::Start).unwrap_err();
        assert_eq!(err.reason(), "job already running");
        assert_eq!(ctx.state(), Job::Running);
    }

    #[test]
    fn shared_round_trip_keeps_state_and_policy() {
        let ctx = Context::<JobMachine>::with_policy(Job::Running, Policy::Strict);
        let shared = ctx.into_shared();
        assert_eq!(shared.label(), "RUNNING");

        let back = shared.into_inner();
        assert_eq!(back.state(), Job::Running);
        assert_eq!(back.policy(), Policy::Strict);
    }

    #[test]
    fn shared_context_serialises_transitions() {
        let shared = Arc::new(SharedContext::<JobMachine>::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || shared.apply(JobOp::Start).map(|step| step.changed()))
            })
            .collect();

        let moved = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .filter(|changed| *changed)
            .count();

        // Exactly one caller observes Queued; the rest see the notice.
        assert_eq!(moved, 1);
        assert_eq!(shared.state(), Job::Running);
    }

    #[test]
    fn shared_apply_releases_lock_before_tracing() {
        let shared = Arc::new(SharedContext::<JobMachine>::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        // The writer reads the context back while the event is formatted.
        // It would deadlock if apply still held the state lock.
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer({
                let shared = Arc::clone(&shared);
                let seen = Arc::clone(&seen);
                move || {
                    seen.lock().unwrap().push(shared.state());
                    std::io::sink()
                }
            })
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            shared.apply(JobOp::Start).unwrap();
            shared.apply(JobOp::Start).unwrap();
        });

        let seen = seen.lock().unwrap();
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|state| *state == Job::Running));
    }
}
