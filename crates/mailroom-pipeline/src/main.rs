//! Demo entry point: submit a handful of posts, print the top words.
//!
//! Run with `RUST_LOG=info cargo run -p mailroom-pipeline` to watch the
//! actors start, exchange messages, and wind down.

use std::time::Duration;

use mailroom::tracing::setup_tracing;
use mailroom_pipeline::catalog::{CatalogMsg, CatalogReply};
use mailroom_pipeline::model::PostDraft;
use mailroom_pipeline::pipeline::Pipeline;
use mailroom_pipeline::tally::{TallyMsg, TallyReply};
use tracing::{info, warn};

const ASK_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    info!("starting word-stats pipeline");

    let pipeline = Pipeline::new();

    let drafts = vec![
        PostDraft::new(
            "Actors in asyncio",
            "Actors process one message at a time from a mailbox",
        ),
        PostDraft::new(
            "Mocking the database",
            "Tests should mock the database instead of calling it",
        ),
        PostDraft::new(
            "Mailbox patterns",
            "A mailbox decouples the sender from the actor behind it",
        ),
    ];

    for draft in drafts {
        match pipeline
            .catalog
            .ask(CatalogMsg::Submit(draft), ASK_TIMEOUT)
            .await?
        {
            CatalogReply::Submitted { id, words } => info!(%id, words, "post submitted"),
            reply => warn!(?reply, "unexpected catalog reply"),
        }
    }

    match pipeline.tally.ask(TallyMsg::Top(5), ASK_TIMEOUT).await? {
        TallyReply::Top(top) => {
            for (word, count) in top {
                info!(%word, count, "top word");
            }
        }
        reply => warn!(?reply, "unexpected tally reply"),
    }

    pipeline.shutdown().await;
    info!("pipeline finished");
    Ok(())
}
