//! # Runtime
//!
//! The runtime spawns actors, drives their receive loops, and keeps the
//! process-wide registry of live actors.
//!
//! # Architecture Note
//! This module is the "server" half of every actor. Each spawned actor gets
//! its own Tokio task running the receive loop, which dequeues one envelope
//! at a time and invokes the actor's handler. Even with thousands of actors
//! alive, each one processes its own messages *sequentially* — the loop
//! holds the only `&mut` to the state, so no `Mutex` or `RwLock` is needed
//! anywhere. Cross-actor concurrency comes from running many loops in
//! parallel, never from sharing state.
//!
//! The registry is a [`DashMap`] keyed by [`ActorId`]: entries are inserted
//! at spawn and removed by a drop guard when the loop's task finishes, so
//! even a panicking handler deregisters its actor. Tasks are tracked with a
//! [`TaskTracker`] so [`Runtime::shutdown`] can wait for every loop to wind
//! down.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, trace, warn};

use crate::actor::{Actor, LifecycleStage};
use crate::config::{FailurePolicy, SpawnOptions, StopMode};
use crate::envelope::{Envelope, ReplySender};
use crate::error::RuntimeError;
use crate::handle::ActorHandle;
use crate::mailbox::{self, MailboxReceiver};

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a spawned actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(u64);

impl ActorId {
    pub(crate) fn next() -> Self {
        ActorId(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct RegistryEntry {
    name: Option<String>,
    cancel: CancellationToken,
    stage: watch::Receiver<LifecycleStage>,
}

struct RuntimeInner {
    registry: DashMap<ActorId, RegistryEntry>,
    tracker: TaskTracker,
}

/// Creates actors and owns the registry of live ones.
///
/// Cloning a `Runtime` yields another reference to the same registry.
/// Lifecycle is explicit: actors live until individually stopped or until
/// [`shutdown`](Runtime::shutdown); dropping the `Runtime` alone does not
/// stop anything.
#[derive(Clone)]
pub struct Runtime {
    inner: Arc<RuntimeInner>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Runtime {
            inner: Arc::new(RuntimeInner {
                registry: DashMap::new(),
                tracker: TaskTracker::new(),
            }),
        }
    }

    /// Spawns an actor with default options (unbounded mailbox, discard on
    /// stop) and returns its handle.
    ///
    /// The actor transitions `Starting → Running` (running its `on_start`
    /// hook in between) before the first message is accepted.
    pub fn spawn<A: Actor>(&self, actor: A) -> ActorHandle<A> {
        self.spawn_with(actor, SpawnOptions::default())
    }

    /// Spawns an actor with explicit [`SpawnOptions`].
    pub fn spawn_with<A: Actor>(&self, actor: A, options: SpawnOptions) -> ActorHandle<A> {
        let SpawnOptions {
            name,
            capacity,
            overflow,
            stop_mode,
        } = options;

        let id = ActorId::next();
        let (sender, receiver) = mailbox::channel(capacity, overflow);
        let (stage_tx, stage_rx) = watch::channel(LifecycleStage::Starting);
        let cancel = CancellationToken::new();

        self.inner.registry.insert(
            id,
            RegistryEntry {
                name: name.clone(),
                cancel: cancel.clone(),
                stage: stage_rx.clone(),
            },
        );
        self.inner.tracker.spawn(run_actor(
            actor,
            id,
            name,
            receiver,
            stage_tx,
            cancel.clone(),
            stop_mode,
            Arc::downgrade(&self.inner),
        ));

        ActorHandle {
            id,
            sender,
            stage: stage_rx,
            cancel,
        }
    }

    /// True while the actor is registered (spawned and not yet stopped).
    pub fn contains(&self, id: ActorId) -> bool {
        self.inner.registry.contains_key(&id)
    }

    /// The registered actor's lifecycle stage, if it is still registered.
    pub fn stage(&self, id: ActorId) -> Option<LifecycleStage> {
        self.inner.registry.get(&id).map(|entry| *entry.stage.borrow())
    }

    /// The registered name of an actor, if it has one.
    pub fn name(&self, id: ActorId) -> Option<String> {
        self.inner.registry.get(&id).and_then(|entry| entry.name.clone())
    }

    /// Number of live actors.
    pub fn len(&self) -> usize {
        self.inner.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.registry.is_empty()
    }

    /// Requests a registered actor to stop by id.
    pub fn stop(&self, id: ActorId) -> Result<(), RuntimeError> {
        match self.inner.registry.get(&id) {
            Some(entry) => {
                entry.cancel.cancel();
                Ok(())
            }
            None => Err(RuntimeError::ActorNotFound(id)),
        }
    }

    /// Stops every registered actor and waits for all receive loops to
    /// finish. Queued backlogs are handled per-actor according to each
    /// actor's [`StopMode`](crate::StopMode).
    pub async fn shutdown(&self) {
        info!(actors = self.inner.registry.len(), "Runtime shutting down");
        for entry in self.inner.registry.iter() {
            entry.value().cancel.cancel();
        }
        self.inner.tracker.close();
        self.inner.tracker.wait().await;
        info!("Runtime shut down");
    }
}

/// Removes the registry entry when the actor's task ends, normally or not.
struct DeregisterGuard {
    id: ActorId,
    registry: Weak<RuntimeInner>,
}

impl Drop for DeregisterGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            inner.registry.remove(&self.id);
        }
    }
}

fn short_type_name<A>() -> &'static str {
    // "mailroom_pipeline::tally::WordTally" -> "WordTally"
    std::any::type_name::<A>().rsplit("::").next().unwrap_or("actor")
}

enum Flow {
    Continue,
    Fatal,
}

/// One actor's receive loop: the sole writer of that actor's state.
#[allow(clippy::too_many_arguments)]
async fn run_actor<A: Actor>(
    mut actor: A,
    id: ActorId,
    name: Option<String>,
    mut mailbox: MailboxReceiver<Envelope<A>>,
    stage: watch::Sender<LifecycleStage>,
    cancel: CancellationToken,
    stop_mode: StopMode,
    registry: Weak<RuntimeInner>,
) {
    let guard = DeregisterGuard { id, registry };
    let kind = short_type_name::<A>();
    let policy = actor.failure_policy();

    let started = match actor.on_start().await {
        Ok(()) => true,
        Err(error) => {
            warn!(actor = kind, %id, error = %error, "on_start failed, actor never ran");
            false
        }
    };
    // A failed start skips straight to the shutdown tail with a closed
    // mailbox, so racing senders still get their asks failed.
    let mut fatal = !started;

    if started {
        stage.send_replace(LifecycleStage::Running);
        info!(actor = kind, %id, name = name.as_deref(), "Actor started");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                envelope = mailbox.recv() => match envelope {
                    Some(envelope) => {
                        if let Flow::Fatal = deliver(&mut actor, envelope, policy, kind, id).await {
                            fatal = true;
                            break;
                        }
                    }
                    // Every handle dropped; nothing can arrive anymore.
                    None => break,
                },
            }
        }
    }

    stage.send_replace(LifecycleStage::Stopping);
    mailbox.close();

    // Backlog: drain actors keep processing, everything else fails queued
    // asks. A handler failure forces discard even in drain mode.
    while let Some(envelope) = mailbox.recv().await {
        if fatal || stop_mode == StopMode::Discard {
            reject(envelope, kind, id);
        } else if let Flow::Fatal = deliver(&mut actor, envelope, policy, kind, id).await {
            fatal = true;
        }
    }

    if started {
        actor.on_stop().await;
    }

    // Deregister before broadcasting Stopped so observers of the terminal
    // stage never find a stale registry entry.
    drop(guard);
    stage.send_replace(LifecycleStage::Stopped);
    info!(actor = kind, %id, "Actor stopped");
}

/// Delivers one envelope: invoke the handler, route the outcome.
async fn deliver<A: Actor>(
    actor: &mut A,
    envelope: Envelope<A>,
    policy: FailurePolicy,
    kind: &'static str,
    id: ActorId,
) -> Flow {
    // Snapshot only for resume actors, taken before the handler can touch
    // the state.
    let snapshot = matches!(policy, FailurePolicy::Resume).then(|| actor.clone());

    match envelope {
        Envelope::Tell { msg } => {
            debug!(actor = kind, %id, ?msg, "delivering tell");
            match actor.handle(msg).await {
                Ok(_) => Flow::Continue,
                Err(error) => failed(actor, snapshot, error, None, kind, id),
            }
        }
        Envelope::Ask { msg, respond_to } => {
            debug!(actor = kind, %id, ?msg, "delivering ask");
            match actor.handle(msg).await {
                Ok(reply) => {
                    if respond_to.send(Ok(reply)).is_err() {
                        trace!(actor = kind, %id, "caller gone, reply discarded");
                    }
                    Flow::Continue
                }
                Err(error) => failed(actor, snapshot, error, Some(respond_to), kind, id),
            }
        }
    }
}

fn failed<A: Actor>(
    actor: &mut A,
    snapshot: Option<A>,
    error: A::Error,
    respond_to: Option<ReplySender<A>>,
    kind: &'static str,
    id: ActorId,
) -> Flow {
    warn!(actor = kind, %id, error = %error, "handler failed");
    if let Some(respond_to) = respond_to {
        let _ = respond_to.send(Err(RuntimeError::Handler(Box::new(error))));
    }
    match snapshot {
        Some(prior) => {
            // Resume: put back the state from before this delivery.
            *actor = prior;
            Flow::Continue
        }
        None => Flow::Fatal,
    }
}

/// Fails a discarded envelope's pending ask; tells just vanish.
fn reject<A: Actor>(envelope: Envelope<A>, kind: &'static str, id: ActorId) {
    if let Envelope::Ask { respond_to, .. } = envelope {
        trace!(actor = kind, %id, "failing queued ask on stop");
        let _ = respond_to.send(Err(RuntimeError::ActorStopped));
    }
}
