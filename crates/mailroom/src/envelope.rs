//! # Envelopes
//!
//! The internal wire format between a handle and its actor's receive loop.
//! A `tell` travels bare; an `ask` carries a one-shot `respond_to` slot that
//! the loop fulfils exactly once — with the handler's reply, the handler's
//! error, or [`RuntimeError::ActorStopped`] if the actor shuts down first.

use tokio::sync::oneshot;

use crate::actor::Actor;
use crate::error::RuntimeError;

/// The fulfilment side of one pending `ask`.
///
/// Sending consumes the slot, so at most one outcome is ever observed by the
/// caller. If the caller timed out, its receiver is gone and the send fails
/// silently — that is the "late fulfilment is discarded" contract.
pub(crate) type ReplySender<A> = oneshot::Sender<Result<<A as Actor>::Reply, RuntimeError>>;

/// One queued delivery for an actor.
pub(crate) enum Envelope<A: Actor> {
    /// Fire-and-forget. The handler's reply is dropped.
    Tell { msg: A::Message },
    /// Request/response. The loop routes the outcome through `respond_to`.
    Ask {
        msg: A::Message,
        respond_to: ReplySender<A>,
    },
}
