//! Pure data structures for the pipeline: blog posts and their drafts.
//! No actor logic lives here; actors own and exchange these values.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Type-safe identifier for catalogued posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub u64);

impl Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "post_{}", self.0)
    }
}

/// A post as submitted, before the catalog has assigned it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A catalogued post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(id: PostId, draft: PostDraft) -> Self {
        Self {
            id,
            title: draft.title,
            body: draft.body,
        }
    }
}
