//! # Word Tally Actor
//!
//! Owns the word-frequency table for the whole pipeline. Recording is a
//! `tell` (the catalog doesn't wait for it), queries are `ask`s. Because the
//! receive loop is the only writer, the table needs no lock no matter how
//! many posts arrive concurrently.

use std::collections::HashMap;
use std::convert::Infallible;

use async_trait::async_trait;
use mailroom::Actor;

#[derive(Debug, Clone, Default)]
pub struct WordTally {
    counts: HashMap<String, u64>,
    words_seen: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TallyMsg {
    /// Add these words to the tally.
    Record(Vec<String>),
    /// The `n` most frequent words, ties broken alphabetically.
    Top(usize),
    /// How often one word has been seen.
    Count(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TallyReply {
    /// Total words seen so far, including the ones just recorded.
    Recorded(u64),
    Top(Vec<(String, u64)>),
    Count(u64),
}

#[async_trait]
impl Actor for WordTally {
    type Message = TallyMsg;
    type Reply = TallyReply;
    type Error = Infallible;

    async fn handle(&mut self, msg: TallyMsg) -> Result<TallyReply, Infallible> {
        match msg {
            TallyMsg::Record(words) => {
                self.words_seen += words.len() as u64;
                for word in words {
                    *self.counts.entry(word).or_insert(0) += 1;
                }
                Ok(TallyReply::Recorded(self.words_seen))
            }
            TallyMsg::Top(n) => {
                let mut entries: Vec<(String, u64)> = self
                    .counts
                    .iter()
                    .map(|(word, count)| (word.clone(), *count))
                    .collect();
                entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                entries.truncate(n);
                Ok(TallyReply::Top(entries))
            }
            TallyMsg::Count(word) => {
                Ok(TallyReply::Count(self.counts.get(&word).copied().unwrap_or(0)))
            }
        }
    }
}
