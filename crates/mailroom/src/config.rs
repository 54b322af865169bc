//! # Spawn Configuration
//!
//! Per-actor knobs fixed at spawn time: a display name for the logs, the
//! mailbox capacity/overflow policy, and what happens to messages still
//! queued when the actor is told to stop.

use crate::mailbox::{MailboxCapacity, OverflowPolicy};

/// What the receive loop does when a handler returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the actor: close the mailbox, fail queued asks, deregister.
    /// This is the default — an isolated failure kills only this actor.
    #[default]
    Stop,
    /// Log the error and keep going with the state as it was before the
    /// failing message was delivered. Explicit opt-in via
    /// [`Actor::failure_policy`](crate::Actor::failure_policy).
    Resume,
}

/// What happens to messages already queued when an actor is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopMode {
    /// Drop the backlog; queued asks fail with
    /// [`RuntimeError::ActorStopped`](crate::RuntimeError::ActorStopped).
    #[default]
    Discard,
    /// Process the backlog to completion, then stop.
    Drain,
}

/// Options accepted by [`Runtime::spawn_with`](crate::Runtime::spawn_with).
///
/// The defaults — unbounded mailbox, discard on stop, no name — match
/// [`Runtime::spawn`](crate::Runtime::spawn).
///
/// ```
/// use mailroom::{MailboxCapacity, SpawnOptions, StopMode};
///
/// let options = SpawnOptions::named("tally").bounded(64).drain_on_stop();
/// assert_eq!(options.capacity, MailboxCapacity::Bounded(64));
/// assert_eq!(options.stop_mode, StopMode::Drain);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    /// Name used in lifecycle logs alongside the actor id.
    pub name: Option<String>,
    /// Mailbox capacity, fixed for the actor's lifetime.
    pub capacity: MailboxCapacity,
    /// Full-mailbox behavior; only meaningful for a bounded capacity.
    pub overflow: OverflowPolicy,
    /// Backlog handling when the actor stops.
    pub stop_mode: StopMode,
}

impl SpawnOptions {
    /// Default options with a display name for the logs.
    pub fn named(name: impl Into<String>) -> Self {
        SpawnOptions {
            name: Some(name.into()),
            ..SpawnOptions::default()
        }
    }

    /// Caps the mailbox at `capacity` messages; senders block when full.
    pub fn bounded(mut self, capacity: usize) -> Self {
        self.capacity = MailboxCapacity::Bounded(capacity);
        self
    }

    /// Makes a full bounded mailbox reject senders instead of blocking them.
    pub fn reject_when_full(mut self) -> Self {
        self.overflow = OverflowPolicy::Reject;
        self
    }

    /// Processes the queued backlog before stopping instead of discarding it.
    pub fn drain_on_stop(mut self) -> Self {
        self.stop_mode = StopMode::Drain;
        self
    }
}
