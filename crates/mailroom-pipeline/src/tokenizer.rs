//! # Tokenizer Actor
//!
//! Splits raw post text into countable words: lowercased, punctuation
//! stripped, short words and stop words dropped. Stateless apart from its
//! configuration, so it opts into [`FailurePolicy::Resume`] — bad input is
//! the caller's problem, not a reason to take the tokenizer down.

use async_trait::async_trait;
use mailroom::{Actor, FailurePolicy};

const STOP_WORDS: &[&str] = &["the", "and", "for", "with", "this", "that"];

#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Words shorter than this are dropped.
    pub min_word_len: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self { min_word_len: 3 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenizerMsg {
    Tokenize(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    #[error("nothing to tokenize")]
    EmptyInput,
}

#[async_trait]
impl Actor for Tokenizer {
    type Message = TokenizerMsg;
    type Reply = Vec<String>;
    type Error = TokenizerError;

    async fn handle(&mut self, msg: TokenizerMsg) -> Result<Vec<String>, TokenizerError> {
        let TokenizerMsg::Tokenize(text) = msg;
        if text.trim().is_empty() {
            return Err(TokenizerError::EmptyInput);
        }
        let words = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| word.len() >= self.min_word_len && !STOP_WORDS.contains(word))
            .map(str::to_string)
            .collect();
        Ok(words)
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Resume
    }
}
