//! # Pipeline Orchestration
//!
//! Wiring actors together is where systems grow complexity, so it lives in
//! one place. [`Pipeline::new`] spawns the leaf actors first, then hands
//! their handles to the catalog — no circular references, no late
//! surprises. [`Pipeline::shutdown`] stops the catalog before the rest so
//! nothing new reaches the tally while it drains.

use mailroom::{ActorHandle, Runtime, SpawnOptions};

use crate::catalog::Catalog;
use crate::tally::WordTally;
use crate::tokenizer::Tokenizer;

/// The fully wired word-stats system.
pub struct Pipeline {
    runtime: Runtime,
    pub tokenizer: ActorHandle<Tokenizer>,
    pub tally: ActorHandle<WordTally>,
    pub catalog: ActorHandle<Catalog>,
}

impl Pipeline {
    pub fn new() -> Self {
        let runtime = Runtime::new();

        // Leaf actors first; the catalog depends on both.
        let tokenizer = runtime.spawn_with(Tokenizer::default(), SpawnOptions::named("tokenizer"));
        // The tally drains on stop so late Record tells still get counted.
        let tally = runtime.spawn_with(
            WordTally::default(),
            SpawnOptions::named("tally").drain_on_stop(),
        );
        let catalog = runtime.spawn_with(
            Catalog::new(tokenizer.clone(), tally.clone()),
            SpawnOptions::named("catalog"),
        );

        Self {
            runtime,
            tokenizer,
            tally,
            catalog,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Stops the catalog first, then every remaining actor, and waits for
    /// all receive loops to finish.
    pub async fn shutdown(self) {
        self.catalog.stop();
        self.catalog.stopped().await;
        self.runtime.shutdown().await;
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
