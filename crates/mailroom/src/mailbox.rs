//! # Mailbox
//!
//! The ordered holding area for messages addressed to one actor.
//!
//! A mailbox is a multi-producer, single-consumer FIFO queue built on
//! [`tokio::sync::mpsc`]. Many handles may enqueue concurrently; exactly one
//! consumer (the owning actor's receive loop) dequeues, so no message is ever
//! seen twice. Delivery order is send order and messages are never dropped
//! except on explicit close.
//!
//! Capacity is fixed per instance when the actor is spawned:
//!
//! - [`MailboxCapacity::Unbounded`] — enqueue never waits.
//! - [`MailboxCapacity::Bounded`] with [`OverflowPolicy::Block`] — a sender
//!   waits until space frees up.
//! - [`MailboxCapacity::Bounded`] with [`OverflowPolicy::Reject`] — enqueue
//!   fails fast with [`RuntimeError::MailboxFull`].

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::RuntimeError;

/// How many messages a mailbox can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxCapacity {
    /// No upper bound; enqueue always succeeds while the mailbox is open.
    Unbounded,
    /// At most this many queued messages (minimum 1).
    Bounded(usize),
}

impl Default for MailboxCapacity {
    fn default() -> Self {
        MailboxCapacity::Unbounded
    }
}

/// What a bounded mailbox does with a sender when it is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Suspend the sender until a slot frees up.
    #[default]
    Block,
    /// Fail the enqueue with [`RuntimeError::MailboxFull`].
    Reject,
}

/// Creates a linked sender/receiver pair for the given capacity policy.
pub(crate) fn channel<T>(
    capacity: MailboxCapacity,
    overflow: OverflowPolicy,
) -> (MailboxSender<T>, MailboxReceiver<T>) {
    match capacity {
        MailboxCapacity::Unbounded => {
            let (tx, rx) = mpsc::unbounded_channel();
            (
                MailboxSender(SenderKind::Unbounded(tx)),
                MailboxReceiver(ReceiverKind::Unbounded(rx)),
            )
        }
        MailboxCapacity::Bounded(capacity) => {
            let (tx, rx) = mpsc::channel(capacity.max(1));
            (
                MailboxSender(SenderKind::Bounded { tx, overflow }),
                MailboxReceiver(ReceiverKind::Bounded(rx)),
            )
        }
    }
}

enum SenderKind<T> {
    Bounded {
        tx: mpsc::Sender<T>,
        overflow: OverflowPolicy,
    },
    Unbounded(mpsc::UnboundedSender<T>),
}

/// The producer half of a mailbox. Cheap to clone; shared by every handle.
pub(crate) struct MailboxSender<T>(SenderKind<T>);

impl<T> Clone for MailboxSender<T> {
    fn clone(&self) -> Self {
        match &self.0 {
            SenderKind::Bounded { tx, overflow } => MailboxSender(SenderKind::Bounded {
                tx: tx.clone(),
                overflow: *overflow,
            }),
            SenderKind::Unbounded(tx) => MailboxSender(SenderKind::Unbounded(tx.clone())),
        }
    }
}

impl<T> MailboxSender<T> {
    /// Appends a message at the tail.
    ///
    /// Fails with [`RuntimeError::MailboxClosed`] once the receiver has been
    /// closed or dropped, and with [`RuntimeError::MailboxFull`] for a full
    /// bounded mailbox under [`OverflowPolicy::Reject`].
    pub(crate) async fn enqueue(&self, item: T) -> Result<(), RuntimeError> {
        match &self.0 {
            SenderKind::Unbounded(tx) => {
                tx.send(item).map_err(|_| RuntimeError::MailboxClosed)
            }
            SenderKind::Bounded {
                tx,
                overflow: OverflowPolicy::Block,
            } => tx.send(item).await.map_err(|_| RuntimeError::MailboxClosed),
            SenderKind::Bounded {
                tx,
                overflow: OverflowPolicy::Reject,
            } => tx.try_send(item).map_err(|e| match e {
                TrySendError::Full(_) => RuntimeError::MailboxFull,
                TrySendError::Closed(_) => RuntimeError::MailboxClosed,
            }),
        }
    }
}

enum ReceiverKind<T> {
    Bounded(mpsc::Receiver<T>),
    Unbounded(mpsc::UnboundedReceiver<T>),
}

/// The consumer half of a mailbox. Owned exclusively by one actor's loop.
pub(crate) struct MailboxReceiver<T>(ReceiverKind<T>);

impl<T> MailboxReceiver<T> {
    /// Removes and returns the head, suspending while the mailbox is empty.
    ///
    /// Returns `None` once the mailbox is closed and fully drained.
    pub(crate) async fn recv(&mut self) -> Option<T> {
        match &mut self.0 {
            ReceiverKind::Bounded(rx) => rx.recv().await,
            ReceiverKind::Unbounded(rx) => rx.recv().await,
        }
    }

    /// Closes the mailbox: further enqueues fail, already-buffered messages
    /// remain retrievable via [`recv`](Self::recv) until drained.
    pub(crate) fn close(&mut self) {
        match &mut self.0 {
            ReceiverKind::Bounded(rx) => rx.close(),
            ReceiverKind::Unbounded(rx) => rx.close(),
        }
    }
}
