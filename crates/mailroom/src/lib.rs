//! # Mailroom
//!
//! A minimal single-process actor runtime: mailboxes, actors, and a
//! request/response bridge over fire-and-forget messaging.
//!
//! ## The Model
//!
//! Three pieces, nothing more:
//!
//! 1. **Mailbox** — an ordered, multi-producer single-consumer queue owned
//!    by exactly one actor. FIFO per sender, safe concurrent enqueue,
//!    optional bound with a fixed full-mailbox policy.
//! 2. **Actor** ([`Actor`]) — private state plus a message handler. The
//!    receive loop is the *only* writer of that state, which is the whole
//!    trick: sequential processing per actor removes every lock.
//! 3. **Runtime** ([`Runtime`]) — spawns actors onto their own Tokio tasks,
//!    keeps the id → handle registry, and shuts everything down on request.
//!
//! A caller `tell`s or `ask`s through an [`ActorHandle`]; the message lands
//! in the mailbox; the loop dequeues it and invokes the handler; the handler
//! mutates only its own state and may message other actors through handles
//! it holds.
//!
//! ## Tell vs Ask
//!
//! - [`ActorHandle::tell`] is one-way: accepted into the mailbox and that's
//!   the last the caller hears of it.
//! - [`ActorHandle::ask`] builds request/response on top: the envelope
//!   carries a one-shot reply slot, the caller suspends cooperatively (no
//!   thread is parked) until the handler's reply arrives or the timeout
//!   elapses. Exactly one of reply / timeout / actor-stopped happens per
//!   ask, and a late reply after timeout is silently discarded.
//!
//! ## Quick Start
//!
//! ```rust
//! use async_trait::async_trait;
//! use mailroom::{Actor, Runtime};
//! use std::time::Duration;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Counter {
//!     count: u64,
//! }
//!
//! #[derive(Debug)]
//! enum CounterMsg {
//!     Increment,
//!     Get,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("counter error")]
//! struct CounterError;
//!
//! #[async_trait]
//! impl Actor for Counter {
//!     type Message = CounterMsg;
//!     type Reply = u64;
//!     type Error = CounterError;
//!
//!     async fn handle(&mut self, msg: CounterMsg) -> Result<u64, CounterError> {
//!         match msg {
//!             CounterMsg::Increment => {
//!                 self.count += 1;
//!                 Ok(self.count)
//!             }
//!             CounterMsg::Get => Ok(self.count),
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let runtime = Runtime::new();
//!     let counter = runtime.spawn(Counter::default());
//!
//!     counter.tell(CounterMsg::Increment).await.unwrap();
//!     let count = counter
//!         .ask(CounterMsg::Get, Duration::from_secs(1))
//!         .await
//!         .unwrap();
//!     assert_eq!(count, 1);
//!
//!     runtime.shutdown().await;
//! }
//! ```
//!
//! ## Failure Isolation
//!
//! A handler error is fatal to that actor alone: the mailbox closes, queued
//! asks fail with [`RuntimeError::ActorStopped`], the registry entry goes
//! away, and every other actor keeps running. An actor that would rather
//! log and carry on opts in via [`Actor::failure_policy`] returning
//! [`FailurePolicy::Resume`], which restores the pre-message state after a
//! failed delivery.
//!
//! ## Stopping
//!
//! [`ActorHandle::stop`] (or [`Runtime::stop`] by id) closes the mailbox.
//! What happens to messages already queued is a per-actor choice made at
//! spawn time: [`StopMode::Discard`] (default) fails queued asks
//! immediately, [`StopMode::Drain`] processes the backlog first. An
//! in-flight handler invocation is never aborted either way.
//!
//! ## Observability
//!
//! The runtime emits `tracing` events — lifecycle transitions at `info`,
//! message receipt at `debug`, handler failures at `warn` — and leaves
//! subscriber installation to the host. [`crate::tracing::setup_tracing`]
//! covers the common `RUST_LOG` setup.
//!
//! ## Testing
//!
//! [`mock::MockHandle`] serves a real [`ActorHandle`] from a scripted
//! expectation queue, so code that holds a handle can be tested without
//! spawning the actor behind it.
//!
//! Not in scope: distributed placement, supervision trees, restart
//! policies, state persistence, network transport.

pub mod actor;
pub mod config;
mod envelope;
pub mod error;
pub mod handle;
pub mod mailbox;
pub mod mock;
pub mod runtime;
pub mod tracing;

pub use actor::{Actor, LifecycleStage};
pub use config::{FailurePolicy, SpawnOptions, StopMode};
pub use error::RuntimeError;
pub use handle::ActorHandle;
pub use mailbox::{MailboxCapacity, OverflowPolicy};
pub use runtime::{ActorId, Runtime};
