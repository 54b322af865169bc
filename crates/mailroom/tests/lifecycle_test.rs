use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mailroom::{Actor, FailurePolicy, Runtime, RuntimeError, SpawnOptions};
use tokio::time::sleep;

const ASK_TIMEOUT: Duration = Duration::from_secs(5);

// --- Test Actors ---

/// Deliberately slow behavior, for timeout and backlog tests.
#[derive(Clone, Debug, Default)]
struct Sleepy {
    naps: u64,
}

#[derive(Debug)]
enum SleepyMsg {
    /// Sleep this many milliseconds, then reply with the nap count.
    Nap(u64),
    Naps,
}

#[derive(Debug, thiserror::Error)]
#[error("sleepy error")]
struct SleepyError;

#[async_trait]
impl Actor for Sleepy {
    type Message = SleepyMsg;
    type Reply = u64;
    type Error = SleepyError;

    async fn handle(&mut self, msg: SleepyMsg) -> Result<u64, SleepyError> {
        match msg {
            SleepyMsg::Nap(ms) => {
                sleep(Duration::from_millis(ms)).await;
                self.naps += 1;
                Ok(self.naps)
            }
            SleepyMsg::Naps => Ok(self.naps),
        }
    }
}

/// Records each processed message in a shared counter, so tests can observe
/// how much of a backlog actually ran after the actor stopped.
#[derive(Clone, Debug)]
struct Effects {
    hits: Arc<AtomicU64>,
}

#[derive(Debug)]
struct Hit;

#[derive(Debug, thiserror::Error)]
#[error("effects error")]
struct EffectsError;

#[async_trait]
impl Actor for Effects {
    type Message = Hit;
    type Reply = ();
    type Error = EffectsError;

    async fn handle(&mut self, _msg: Hit) -> Result<(), EffectsError> {
        sleep(Duration::from_millis(25)).await;
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// --- Tests ---

/// A tiny timeout against a slow handler yields AskTimeout, and the
/// handler's late reply is discarded rather than leaking into a later ask.
#[tokio::test]
async fn ask_timeout_discards_the_late_reply() {
    let runtime = Runtime::new();
    let sleepy = runtime.spawn(Sleepy::default());

    let err = sleepy
        .ask(SleepyMsg::Nap(200), Duration::from_millis(25))
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::AskTimeout(_)));

    // The actor still finished the nap; only the reply went nowhere.
    let naps = sleepy.ask(SleepyMsg::Naps, ASK_TIMEOUT).await.unwrap();
    assert_eq!(naps, 1);

    runtime.shutdown().await;
}

/// stop() fails queued asks with ActorStopped but never aborts the handler
/// invocation already in flight.
#[tokio::test]
async fn stop_fails_queued_asks_without_aborting_inflight_work() {
    let runtime = Runtime::new();
    let sleepy = runtime.spawn(Sleepy::default());

    let handle = sleepy.clone();
    let inflight = tokio::spawn(async move { handle.ask(SleepyMsg::Nap(300), ASK_TIMEOUT).await });
    sleep(Duration::from_millis(50)).await; // now being processed

    let handle = sleepy.clone();
    let queued = tokio::spawn(async move { handle.ask(SleepyMsg::Nap(1), ASK_TIMEOUT).await });
    sleep(Duration::from_millis(20)).await; // now sitting in the mailbox

    sleepy.stop();

    let err = queued.await.unwrap().unwrap_err();
    assert!(matches!(err, RuntimeError::ActorStopped));

    let naps = inflight.await.unwrap().unwrap();
    assert_eq!(naps, 1);

    runtime.shutdown().await;
}

#[tokio::test]
async fn tell_after_stop_fails() {
    let runtime = Runtime::new();
    let sleepy = runtime.spawn(Sleepy::default());
    let stale = sleepy.clone(); // obtained before stop

    sleepy.stop();
    sleepy.stopped().await;

    let err = stale.tell(SleepyMsg::Naps).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::ActorNotFound(_) | RuntimeError::MailboxClosed
    ));

    runtime.shutdown().await;
}

/// With StopMode::Drain the queued backlog is processed before stopping.
#[tokio::test]
async fn drain_mode_processes_the_backlog() {
    let runtime = Runtime::new();
    let hits = Arc::new(AtomicU64::new(0));
    let actor = runtime.spawn_with(
        Effects { hits: hits.clone() },
        SpawnOptions::named("drainer").drain_on_stop(),
    );

    for _ in 0..10 {
        actor.tell(Hit).await.unwrap();
    }
    actor.stop();
    actor.stopped().await;

    assert_eq!(hits.load(Ordering::SeqCst), 10);

    runtime.shutdown().await;
}

/// The default StopMode::Discard drops whatever is still queued.
#[tokio::test]
async fn discard_mode_drops_the_backlog() {
    let runtime = Runtime::new();
    let hits = Arc::new(AtomicU64::new(0));
    let actor = runtime.spawn(Effects { hits: hits.clone() });

    for _ in 0..10 {
        actor.tell(Hit).await.unwrap();
    }
    sleep(Duration::from_millis(40)).await; // a couple get processed
    actor.stop();
    actor.stopped().await;

    assert!(hits.load(Ordering::SeqCst) < 10);

    runtime.shutdown().await;
}

#[tokio::test]
async fn bounded_reject_mailbox_reports_full() {
    let runtime = Runtime::new();
    let sleepy = runtime.spawn_with(
        Sleepy::default(),
        SpawnOptions::named("busy").bounded(1).reject_when_full(),
    );

    // Occupy the handler so the next message stays queued.
    let handle = sleepy.clone();
    let busy = tokio::spawn(async move { handle.ask(SleepyMsg::Nap(300), ASK_TIMEOUT).await });
    sleep(Duration::from_millis(50)).await;

    sleepy.tell(SleepyMsg::Nap(1)).await.unwrap(); // fills the single slot
    let err = sleepy.tell(SleepyMsg::Nap(1)).await.unwrap_err();
    assert!(matches!(err, RuntimeError::MailboxFull));

    busy.await.unwrap().unwrap();
    runtime.shutdown().await;
}

/// FailurePolicy::Resume keeps the actor alive and restores the state from
/// before the failing message.
#[tokio::test]
async fn resume_policy_restores_prior_state() {
    #[derive(Clone, Debug, Default)]
    struct Ledger {
        total: u64,
    }

    #[derive(Debug)]
    enum LedgerMsg {
        Add(u64),
        Total,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("unlucky amount")]
    struct UnluckyAmount;

    #[async_trait]
    impl Actor for Ledger {
        type Message = LedgerMsg;
        type Reply = u64;
        type Error = UnluckyAmount;

        async fn handle(&mut self, msg: LedgerMsg) -> Result<u64, UnluckyAmount> {
            match msg {
                LedgerMsg::Add(n) => {
                    // Mutates before failing, so the rollback is observable.
                    self.total += n;
                    if n == 13 {
                        return Err(UnluckyAmount);
                    }
                    Ok(self.total)
                }
                LedgerMsg::Total => Ok(self.total),
            }
        }

        fn failure_policy(&self) -> FailurePolicy {
            FailurePolicy::Resume
        }
    }

    let runtime = Runtime::new();
    let ledger = runtime.spawn(Ledger::default());

    assert_eq!(ledger.ask(LedgerMsg::Add(7), ASK_TIMEOUT).await.unwrap(), 7);

    let err = ledger.ask(LedgerMsg::Add(13), ASK_TIMEOUT).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Handler(_)));

    // The half-applied Add(13) was rolled back and the actor kept running.
    assert_eq!(ledger.ask(LedgerMsg::Total, ASK_TIMEOUT).await.unwrap(), 7);

    runtime.shutdown().await;
}

#[tokio::test]
async fn registry_tracks_actor_lifecycles() {
    let runtime = Runtime::new();
    assert!(runtime.is_empty());

    let first = runtime.spawn(Sleepy::default());
    let second = runtime.spawn_with(Sleepy::default(), SpawnOptions::named("second"));
    assert_eq!(runtime.len(), 2);
    assert!(runtime.contains(first.id()));
    assert_eq!(runtime.name(second.id()), Some("second".to_string()));

    // Ensure the first actor is past Starting before checking its stage.
    first.ask(SleepyMsg::Naps, ASK_TIMEOUT).await.unwrap();
    assert_eq!(
        runtime.stage(first.id()),
        Some(mailroom::LifecycleStage::Running)
    );

    runtime.stop(first.id()).unwrap();
    first.stopped().await;
    assert!(!runtime.contains(first.id()));
    assert_eq!(runtime.len(), 1);
    assert!(matches!(
        runtime.stop(first.id()),
        Err(RuntimeError::ActorNotFound(_))
    ));

    runtime.shutdown().await;
    assert!(runtime.is_empty());
    assert_eq!(second.stage(), mailroom::LifecycleStage::Stopped);
}

/// A failing on_start aborts the spawn: the actor never runs and callers
/// see a terminal error.
#[tokio::test]
async fn failed_on_start_never_accepts_messages() {
    #[derive(Clone, Debug)]
    struct FalseStart;

    #[derive(Debug)]
    struct Nudge;

    #[derive(Debug, thiserror::Error)]
    #[error("refused to start")]
    struct RefusedToStart;

    #[async_trait]
    impl Actor for FalseStart {
        type Message = Nudge;
        type Reply = ();
        type Error = RefusedToStart;

        async fn handle(&mut self, _msg: Nudge) -> Result<(), RefusedToStart> {
            Ok(())
        }

        async fn on_start(&mut self) -> Result<(), RefusedToStart> {
            Err(RefusedToStart)
        }
    }

    let runtime = Runtime::new();
    let actor = runtime.spawn(FalseStart);
    actor.stopped().await;

    let err = actor.ask(Nudge, ASK_TIMEOUT).await.unwrap_err();
    assert!(err.is_terminal(), "unexpected error: {err}");

    runtime.shutdown().await;
}
