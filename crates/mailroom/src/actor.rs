//! # Actor Trait
//!
//! The [`Actor`] trait is the contract a unit of state must satisfy to be
//! driven by the runtime. It specifies associated types for the accepted
//! message set, the reply type, and the error type, plus lifecycle hooks
//! (`on_start`, `on_stop`) and an opt-in recovery policy.
//!
//! # Architecture Note
//! Why a trait instead of a plain behavior closure?
//! The messages an actor accepts are a *tagged variant* — one enum per actor
//! — so the compiler rules out sending a tokenizer message to a tally actor.
//! The `&mut self` receiver makes the isolation guarantee visible in the
//! signature: only the receive loop ever holds that `&mut`, so the actor's
//! state has exactly one writer and needs no locks.
//!
//! # Provided Methods (Hooks)
//! `on_start` and `on_stop` have default no-op implementations; override them
//! only when the actor needs setup or teardown. `failure_policy` defaults to
//! [`FailurePolicy::Stop`] — an actor that should survive handler errors must
//! opt in explicitly by returning [`FailurePolicy::Resume`].

use std::fmt::Debug;

use async_trait::async_trait;

use crate::config::FailurePolicy;

/// An isolated unit of state plus a message-handling behavior.
///
/// # Concurrency Model
/// Each actor runs in its own Tokio task and processes messages one at a
/// time, in mailbox order. Many actors run in parallel, but no two handler
/// invocations of the *same* actor ever overlap.
///
/// # Clone Bound
/// `Clone` exists for one purpose: when an actor opts into
/// [`FailurePolicy::Resume`], the loop snapshots the state before each
/// delivery so a failed handler leaves the prior state intact. Actors using
/// the default stop-on-error policy never get cloned.
#[async_trait]
pub trait Actor: Clone + Send + Sync + 'static {
    /// The set of messages this actor accepts, usually an enum.
    type Message: Send + Debug + 'static;

    /// The value produced for `ask` callers. Use `()` for pure tell actors.
    type Reply: Send + Debug + 'static;

    /// The error type a handler may fail with.
    ///
    /// One error type per actor, not per message: the union of everything
    /// the handler can fail with. Callers match on a single type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Processes one message and produces a reply.
    ///
    /// For a `tell` delivery the reply is discarded; for an `ask` it is sent
    /// back to the suspended caller. Returning `Err` invokes the actor's
    /// [`failure_policy`](Self::failure_policy).
    async fn handle(&mut self, msg: Self::Message) -> Result<Self::Reply, Self::Error>;

    /// What the receive loop does when [`handle`](Self::handle) fails.
    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Stop
    }

    /// Called once, before the first message is accepted.
    ///
    /// Failing here aborts the spawn: the actor goes straight to
    /// [`LifecycleStage::Stopped`] without processing anything.
    async fn on_start(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once, after the last message, before the actor is deregistered.
    async fn on_stop(&mut self) {}
}

/// Where an actor is in its life. Monotonic; `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    /// Spawned, running `on_start`, not yet accepting messages.
    Starting,
    /// Accepting and processing messages.
    Running,
    /// Mailbox closed, backlog being drained or discarded.
    Stopping,
    /// Terminal. Every operation against the actor now fails.
    Stopped,
}

impl LifecycleStage {
    /// True once the actor no longer accepts new messages.
    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleStage::Stopping | LifecycleStage::Stopped)
    }
}
