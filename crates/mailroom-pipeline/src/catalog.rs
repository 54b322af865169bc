//! # Catalog Actor
//!
//! The front door of the pipeline: stores posts and coordinates the other
//! actors. On submission it `ask`s the tokenizer for the post's words, then
//! `tell`s the tally to record them — the catalog never waits on the tally.
//!
//! # Architecture Note
//! The catalog holds *handles* to the tokenizer and tally, not the actors
//! themselves. Dependencies are wired at construction by whoever spawns the
//! system (see [`Pipeline`](crate::pipeline::Pipeline)), so the catalog
//! stays testable against mocked handles.
//!
//! The catalog opts into [`FailurePolicy::Resume`]: a rejected post fails
//! that one submission and rolls back any partial bookkeeping, rather than
//! taking the whole catalog down with it.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use mailroom::{Actor, ActorHandle, FailurePolicy, RuntimeError};
use tracing::info;

use crate::model::{Post, PostDraft, PostId};
use crate::tally::{TallyMsg, WordTally};
use crate::tokenizer::{Tokenizer, TokenizerMsg};

pub const DEFAULT_ASK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct Catalog {
    posts: HashMap<PostId, Post>,
    next_id: u64,
    tokenizer: ActorHandle<Tokenizer>,
    tally: ActorHandle<WordTally>,
    ask_timeout: Duration,
}

impl Catalog {
    pub fn new(tokenizer: ActorHandle<Tokenizer>, tally: ActorHandle<WordTally>) -> Self {
        Self {
            posts: HashMap::new(),
            next_id: 1,
            tokenizer,
            tally,
            ask_timeout: DEFAULT_ASK_TIMEOUT,
        }
    }

    /// Deadline for the internal tokenizer ask.
    pub fn with_ask_timeout(mut self, timeout: Duration) -> Self {
        self.ask_timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogMsg {
    Submit(PostDraft),
    Get(PostId),
    Len,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogReply {
    Submitted { id: PostId, words: usize },
    Post(Option<Post>),
    Len(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("tokenizer request failed: {0}")]
    Tokenizer(RuntimeError),
    #[error("tally request failed: {0}")]
    Tally(RuntimeError),
}

#[async_trait]
impl Actor for Catalog {
    type Message = CatalogMsg;
    type Reply = CatalogReply;
    type Error = CatalogError;

    async fn handle(&mut self, msg: CatalogMsg) -> Result<CatalogReply, CatalogError> {
        match msg {
            CatalogMsg::Submit(draft) => {
                let text = format!("{} {}", draft.title, draft.body);
                let words = self
                    .tokenizer
                    .ask(TokenizerMsg::Tokenize(text), self.ask_timeout)
                    .await
                    .map_err(CatalogError::Tokenizer)?;
                self.tally
                    .tell(TallyMsg::Record(words.clone()))
                    .await
                    .map_err(CatalogError::Tally)?;

                let id = PostId(self.next_id);
                self.next_id += 1;
                self.posts.insert(id, Post::new(id, draft));
                info!(%id, words = words.len(), "post catalogued");
                Ok(CatalogReply::Submitted {
                    id,
                    words: words.len(),
                })
            }
            CatalogMsg::Get(id) => Ok(CatalogReply::Post(self.posts.get(&id).cloned())),
            CatalogMsg::Len => Ok(CatalogReply::Len(self.posts.len())),
        }
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Resume
    }
}
