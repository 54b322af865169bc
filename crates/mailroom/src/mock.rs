//! # Mock Handles & Testing Guide
//!
//! [`MockHandle<A>`] hands out a real [`ActorHandle<A>`] that is served by a
//! scripted expectation queue instead of a live actor. It lets you unit-test
//! code that *talks to* an actor — orchestrators, pipelines, other actors
//! holding its handle — without spawning the real thing.
//!
//! ## When to use a mock vs a real actor
//!
//! | Feature | MockHandle | Real actor |
//! |---------|------------|------------|
//! | **Speed** | Instant, no handler logic runs | Fast, but real work happens |
//! | **Determinism** | Fully scripted | Subject to the scheduler |
//! | **Error injection** | Trivial (`return_err`) | Needs a reproducing state |
//! | **Use case** | Testing code around the handle | Testing the actor itself |
//!
//! ## Example
//!
//! ```rust
//! use mailroom::mock::MockHandle;
//! use mailroom::Actor;
//! use async_trait::async_trait;
//! use std::time::Duration;
//!
//! #[derive(Clone, Debug)]
//! struct Echo;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Say(String);
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("echo error")]
//! struct EchoError;
//!
//! #[async_trait]
//! impl Actor for Echo {
//!     type Message = Say;
//!     type Reply = String;
//!     type Error = EchoError;
//!     async fn handle(&mut self, Say(line): Say) -> Result<String, EchoError> {
//!         Ok(line)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockHandle::<Echo>::new();
//!     mock.expect(Say("ping".into())).return_ok("pong".into());
//!
//!     let handle = mock.handle();
//!     let reply = handle.ask(Say("ping".into()), Duration::from_secs(1)).await.unwrap();
//!     assert_eq!(reply, "pong");
//!
//!     mock.verify();
//! }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::actor::{Actor, LifecycleStage};
use crate::envelope::Envelope;
use crate::error::RuntimeError;
use crate::handle::ActorHandle;
use crate::mailbox::{self, MailboxCapacity, OverflowPolicy};
use crate::runtime::ActorId;

struct Expectation<A: Actor> {
    message: A::Message,
    response: Result<A::Reply, RuntimeError>,
}

type Script<A> = Arc<Mutex<VecDeque<Expectation<A>>>>;

/// A scripted stand-in for a running actor.
///
/// Expectations are consumed strictly in order. A message that does not
/// match the next expectation, or arrives with none remaining, panics the
/// serving task — the caller then observes [`RuntimeError::ActorStopped`].
pub struct MockHandle<A: Actor> {
    handle: ActorHandle<A>,
    expectations: Script<A>,
    _task: JoinHandle<()>,
}

impl<A: Actor> Default for MockHandle<A>
where
    A::Message: PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Actor> MockHandle<A>
where
    A::Message: PartialEq,
{
    /// Creates a mock with an empty script. Must be called inside a Tokio
    /// runtime: the serving loop is a spawned task.
    pub fn new() -> Self {
        let (sender, mut receiver) =
            mailbox::channel(MailboxCapacity::Unbounded, OverflowPolicy::Block);
        let (stage_tx, stage_rx) = watch::channel(LifecycleStage::Running);
        let expectations: Script<A> = Arc::new(Mutex::new(VecDeque::new()));

        let script = expectations.clone();
        let task = tokio::spawn(async move {
            // Holding the stage sender keeps handle.stage() at Running for
            // as long as the mock serves.
            let _stage = stage_tx;
            while let Some(envelope) = receiver.recv().await {
                let expectation = script
                    .lock()
                    .expect("mock script lock poisoned")
                    .pop_front();
                let Some(expectation) = expectation else {
                    panic!("MockHandle: message arrived with no expectation left");
                };
                match envelope {
                    Envelope::Tell { msg } => {
                        assert!(
                            msg == expectation.message,
                            "MockHandle: unexpected tell {msg:?}"
                        );
                    }
                    Envelope::Ask { msg, respond_to } => {
                        assert!(
                            msg == expectation.message,
                            "MockHandle: unexpected ask {msg:?}"
                        );
                        let _ = respond_to.send(expectation.response);
                    }
                }
            }
        });

        MockHandle {
            handle: ActorHandle {
                id: ActorId::next(),
                sender,
                stage: stage_rx,
                cancel: CancellationToken::new(),
            },
            expectations,
            _task: task,
        }
    }

    /// The handle to hand to the code under test. Clone-cheap like any
    /// other [`ActorHandle`].
    pub fn handle(&self) -> ActorHandle<A> {
        self.handle.clone()
    }

    /// Scripts the next expected message; finish with
    /// [`return_ok`](ExpectationBuilder::return_ok) or
    /// [`return_err`](ExpectationBuilder::return_err).
    pub fn expect(&self, message: A::Message) -> ExpectationBuilder<A> {
        ExpectationBuilder {
            message,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every scripted expectation was consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock script lock poisoned")
            .len();
        assert!(remaining == 0, "{remaining} expectation(s) never arrived");
    }
}

/// Second half of [`MockHandle::expect`].
pub struct ExpectationBuilder<A: Actor> {
    message: A::Message,
    expectations: Script<A>,
}

impl<A: Actor> ExpectationBuilder<A> {
    /// The scripted reply for this message. For a `tell` delivery the reply
    /// is dropped, matching the real runtime.
    pub fn return_ok(self, reply: A::Reply) {
        self.push(Ok(reply));
    }

    /// The scripted failure for this message.
    pub fn return_err(self, error: RuntimeError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<A::Reply, RuntimeError>) {
        self.expectations
            .lock()
            .expect("mock script lock poisoned")
            .push_back(Expectation {
                message: self.message,
                response,
            });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;

    #[derive(Clone, Debug)]
    struct Probe;

    #[derive(Debug, Clone, PartialEq)]
    enum ProbeMsg {
        Hello,
        Goodbye,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("probe error")]
    struct ProbeError;

    #[async_trait]
    impl Actor for Probe {
        type Message = ProbeMsg;
        type Reply = &'static str;
        type Error = ProbeError;

        async fn handle(&mut self, _msg: ProbeMsg) -> Result<&'static str, ProbeError> {
            Ok("real")
        }
    }

    #[tokio::test]
    async fn scripted_ask_reply() {
        let mock = MockHandle::<Probe>::new();
        mock.expect(ProbeMsg::Hello).return_ok("hi");

        let handle = mock.handle();
        let reply = handle
            .ask(ProbeMsg::Hello, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(reply, "hi");
        mock.verify();
    }

    #[tokio::test]
    async fn scripted_failure() {
        let mock = MockHandle::<Probe>::new();
        mock.expect(ProbeMsg::Hello)
            .return_err(RuntimeError::Handler(Box::new(ProbeError)));

        let err = mock
            .handle()
            .ask(ProbeMsg::Hello, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Handler(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn tell_consumes_an_expectation() {
        let mock = MockHandle::<Probe>::new();
        mock.expect(ProbeMsg::Goodbye).return_ok("bye");

        mock.handle().tell(ProbeMsg::Goodbye).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "never arrived")]
    async fn verify_flags_unmet_expectations() {
        let mock = MockHandle::<Probe>::new();
        mock.expect(ProbeMsg::Hello).return_ok("hi");
        mock.verify();
    }
}
