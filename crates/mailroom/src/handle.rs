//! # Actor Handle
//!
//! The caller-facing half of an actor. A handle holds the mailbox sender, a
//! watch on the actor's lifecycle stage, and the cancellation token that
//! stops the actor — nothing else. It is cheap to clone and can be shared
//! across tasks or stored inside other actors for cross-actor messaging.
//!
//! ## The Ask Bridge
//! `ask` converts the one-way mailbox into request/response without a
//! dedicated blocked thread: the caller enqueues an envelope carrying a
//! [`oneshot`] reply slot and suspends on the receiving end under
//! [`tokio::time::timeout`]. Any number of concurrent asks cost one small
//! channel each, never a worker. On timeout the receiver is dropped, so a
//! late fulfilment by the actor fails its `send` and is discarded — the
//! caller observes exactly one of reply, timeout, or actor-stopped.

use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::actor::{Actor, LifecycleStage};
use crate::envelope::Envelope;
use crate::error::RuntimeError;
use crate::mailbox::MailboxSender;
use crate::runtime::ActorId;

/// A shareable reference to a running actor.
///
/// Obtained from [`Runtime::spawn`](crate::Runtime::spawn); becomes stale
/// once the actor stops, after which every operation fails with
/// [`RuntimeError::ActorNotFound`] or [`RuntimeError::MailboxClosed`].
pub struct ActorHandle<A: Actor> {
    pub(crate) id: ActorId,
    pub(crate) sender: MailboxSender<Envelope<A>>,
    pub(crate) stage: watch::Receiver<LifecycleStage>,
    pub(crate) cancel: CancellationToken,
}

impl<A: Actor> Clone for ActorHandle<A> {
    fn clone(&self) -> Self {
        ActorHandle {
            id: self.id,
            sender: self.sender.clone(),
            stage: self.stage.clone(),
            cancel: self.cancel.clone(),
        }
    }
}

impl<A: Actor> std::fmt::Debug for ActorHandle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorHandle")
            .field("id", &self.id)
            .field("stage", &self.stage())
            .finish()
    }
}

impl<A: Actor> ActorHandle<A> {
    /// The actor's opaque runtime id.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// The actor's current lifecycle stage.
    pub fn stage(&self) -> LifecycleStage {
        *self.stage.borrow()
    }

    /// True while the actor accepts messages.
    pub fn is_running(&self) -> bool {
        self.stage() == LifecycleStage::Running
    }

    /// Sends a message without waiting for a result.
    ///
    /// Returns as soon as the message is accepted by the mailbox. Fails with
    /// [`RuntimeError::ActorNotFound`] on a stale handle, or with the
    /// mailbox's own refusal ([`MailboxClosed`](RuntimeError::MailboxClosed),
    /// [`MailboxFull`](RuntimeError::MailboxFull)).
    #[instrument(skip(self, msg), fields(id = %self.id))]
    pub async fn tell(&self, msg: A::Message) -> Result<(), RuntimeError> {
        if self.stage().is_terminal() {
            return Err(RuntimeError::ActorNotFound(self.id));
        }
        debug!("tell");
        self.sender.enqueue(Envelope::Tell { msg }).await
    }

    /// Sends a message and suspends until the actor replies or the deadline
    /// passes.
    ///
    /// Exactly one of three outcomes occurs:
    /// - `Ok(reply)` or `Err(RuntimeError::Handler)` — the actor processed
    ///   the message;
    /// - `Err(RuntimeError::AskTimeout)` — no fulfilment within `timeout`;
    ///   the actor may still process the message later, but its reply is
    ///   discarded;
    /// - `Err(RuntimeError::ActorStopped)` — the actor stopped with this
    ///   request still pending.
    ///
    /// The timeout cancels only this caller's wait, never the in-flight
    /// processing inside the actor.
    #[instrument(skip(self, msg), fields(id = %self.id))]
    pub async fn ask(&self, msg: A::Message, timeout: Duration) -> Result<A::Reply, RuntimeError> {
        if self.stage().is_terminal() {
            return Err(RuntimeError::ActorNotFound(self.id));
        }
        debug!("ask");
        let (respond_to, response) = oneshot::channel();
        self.sender.enqueue(Envelope::Ask { msg, respond_to }).await?;
        match time::timeout(timeout, response).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err(RuntimeError::ActorStopped),
            Err(_) => Err(RuntimeError::AskTimeout(timeout)),
        }
    }

    /// Requests the actor to stop. Returns immediately.
    ///
    /// The mailbox closes and the backlog is handled according to the
    /// actor's [`StopMode`](crate::StopMode); an in-flight handler
    /// invocation always runs to completion first. Use
    /// [`stopped`](Self::stopped) to await the terminal stage.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Suspends until the actor reaches [`LifecycleStage::Stopped`].
    pub async fn stopped(&self) {
        let mut stage = self.stage.clone();
        // An Err here means the loop's sender is gone, which is as stopped
        // as it gets.
        let _ = stage
            .wait_for(|stage| *stage == LifecycleStage::Stopped)
            .await;
    }
}
