//! # Runtime Errors
//!
//! This module defines the common error types used throughout the runtime.
//! Every failure a caller can observe through a handle is a variant here;
//! errors raised inside a handler stay local to that actor (or to the one
//! `ask` call that triggered them) and never take the runtime down.

use std::time::Duration;

use crate::runtime::ActorId;

/// Errors that can occur when interacting with an actor through its handle.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A bounded mailbox with [`OverflowPolicy::Reject`](crate::OverflowPolicy::Reject)
    /// had no free slot for the message.
    #[error("mailbox full")]
    MailboxFull,
    /// The mailbox was closed before the message could be accepted.
    #[error("mailbox closed")]
    MailboxClosed,
    /// The handle refers to an actor that is no longer registered.
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),
    /// The actor stopped before fulfilling the request.
    #[error("actor stopped")]
    ActorStopped,
    /// No reply arrived within the caller-specified deadline.
    #[error("ask timed out after {0:?}")]
    AskTimeout(Duration),
    /// The actor's handler returned an error while processing this message.
    #[error("handler error: {0}")]
    Handler(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RuntimeError {
    /// True if the error means the target actor can no longer accept work.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RuntimeError::MailboxClosed
                | RuntimeError::ActorNotFound(_)
                | RuntimeError::ActorStopped
        )
    }
}
