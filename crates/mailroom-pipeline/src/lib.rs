//! # Word-Stats Pipeline
//!
//! A small host program for the [`mailroom`] runtime: blog posts go in, word
//! statistics come out.
//!
//! - **[model]**: pure data ([`Post`](model::Post), [`PostDraft`](model::PostDraft)).
//! - **[tokenizer]**: stateless text-to-words actor, resume-on-error.
//! - **[tally]**: the word-frequency table, fed by `tell`, queried by `ask`.
//! - **[catalog]**: stores posts and coordinates the other two.
//! - **[pipeline]**: builds, wires, and shuts down the whole system.
//!
//! The binary in `main.rs` runs a short demo; the integration tests in
//! `tests/` exercise the same wiring end to end and against mocked handles.

pub mod catalog;
pub mod model;
pub mod pipeline;
pub mod tally;
pub mod tokenizer;

pub use catalog::{Catalog, CatalogMsg, CatalogReply};
pub use model::{Post, PostDraft, PostId};
pub use pipeline::Pipeline;
pub use tally::{TallyMsg, TallyReply, WordTally};
pub use tokenizer::{Tokenizer, TokenizerMsg};
