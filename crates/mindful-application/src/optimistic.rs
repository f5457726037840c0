//! Optimistic mutation primitive.
//!
//! A mutation is four steps: snapshot the current value, apply the expected
//! result locally, perform the remote call, then reconcile with the answer
//! or roll back to the snapshot. [`OptimisticCell`] runs those steps for
//! one value at a time.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mindful_core::error::{MindfulError, Result};
use tokio::sync::Mutex;

/// One remote mutation of a locally held value.
#[async_trait]
pub trait OptimisticMutation: Send + Sync {
    type State: Clone + Send;
    type Response: Send;

    /// The value the user should see while the call is in flight.
    fn apply(&self, state: &Self::State) -> Self::State;

    /// The remote call.
    async fn perform(&self) -> Result<Self::Response>;

    /// Folds the remote answer into the optimistic value.
    fn reconcile(&self, optimistic: &Self::State, response: Self::Response) -> Self::State;
}

/// How a mutation ended.
#[derive(Debug, Clone)]
pub enum MutationOutcome {
    /// The remote call succeeded and its answer was reconciled.
    Applied,
    /// The remote call failed; the pre-mutation value was restored.
    RolledBack(MindfulError),
    /// Another mutation was still in flight; nothing happened.
    Ignored,
    /// The cell was detached; a late answer was discarded.
    Stale,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Clears the in-flight flag when dropped, on every exit path.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A value mutated optimistically, at most one mutation at a time.
pub struct OptimisticCell<S> {
    state: Mutex<S>,
    in_flight: AtomicBool,
    detached: AtomicBool,
}

impl<S: Clone + Send> OptimisticCell<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: Mutex::new(initial),
            in_flight: AtomicBool::new(false),
            detached: AtomicBool::new(false),
        }
    }

    pub async fn current(&self) -> S {
        self.state.lock().await.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Marks the owner as gone; answers arriving afterwards are dropped.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::Release);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }

    /// Runs the mutation produced by `plan`.
    ///
    /// `plan` sees the value as it is once the in-flight slot is taken, so
    /// the mutation is always derived from settled state.
    pub async fn run<M, P>(&self, plan: P) -> MutationOutcome
    where
        M: OptimisticMutation<State = S>,
        P: FnOnce(&S) -> M + Send,
    {
        if self.is_detached() {
            return MutationOutcome::Stale;
        }
        let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight) else {
            return MutationOutcome::Ignored;
        };

        let (mutation, snapshot, optimistic) = {
            let mut state = self.state.lock().await;
            let snapshot = state.clone();
            let mutation = plan(&snapshot);
            let optimistic = mutation.apply(&snapshot);
            *state = optimistic.clone();
            (mutation, snapshot, optimistic)
        };

        let result = mutation.perform().await;

        if self.is_detached() {
            return MutationOutcome::Stale;
        }

        let mut state = self.state.lock().await;
        match result {
            Ok(response) => {
                *state = mutation.reconcile(&optimistic, response);
                MutationOutcome::Applied
            }
            Err(e) => {
                *state = snapshot;
                MutationOutcome::RolledBack(e)
            }
        }
    }
}
