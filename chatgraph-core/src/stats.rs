//! Chat text statistics
//!
//! Counts words across message texts after stopword filtering, and ranks
//! participants by how many real messages they wrote. The ranked word list
//! is the input a word-cloud renderer needs; rendering itself is left to
//! whatever consumes the JSON.
//!
//! ## Tokenization
//!
//! Text is split on whitespace, each token lowercased and trimmed of
//! leading/trailing punctuation. Tokens shorter than
//! [`StatsOptions::min_word_len`] characters, tokens without a letter and
//! stopwords are dropped. Stopwords go through the same normalization.
//!
//! Equal counts keep first-seen order, so output is reproducible.

use crate::error::Result;
use crate::graph::ParticipantRegistry;
use crate::types::{Message, ParticipantId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Limits for [`compute_stats`].
#[derive(Debug, Clone)]
pub struct StatsOptions {
    /// Number of words to keep in [`ChatStats::top_words`]
    pub top_words: usize,
    /// Number of participants to keep in [`ChatStats::top_participants`]
    pub top_participants: usize,
    /// Shortest token, in characters, that counts as a word
    pub min_word_len: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            top_words: 50,
            top_participants: 10,
            min_word_len: 2,
        }
    }
}

/// Words excluded from counting.
#[derive(Debug, Default, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// One stopword per line; blank lines and `#` comments are ignored.
    pub fn from_lines(content: &str) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(normalize_token)
            .collect();
        Self { words }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let stopwords = Self::from_lines(&content);
        tracing::info!(
            path = %path.display(),
            count = stopwords.len(),
            "Loaded stopwords"
        );
        Ok(stopwords)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lowercase and strip surrounding punctuation; `None` if nothing is left.
fn normalize_token(token: &str) -> Option<String> {
    let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Split `text` into normalized tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(normalize_token)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantMessages {
    pub id: ParticipantId,
    pub label: String,
    pub messages: u64,
}

/// Text statistics for one transcript.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatStats {
    /// Real messages (service events excluded)
    pub messages: u64,
    /// Real messages with a non-empty text body
    pub text_messages: u64,
    /// Words counted after filtering
    pub words: u64,
    /// Distinct words counted after filtering
    pub distinct_words: usize,
    pub top_words: Vec<WordCount>,
    pub top_participants: Vec<ParticipantMessages>,
}

/// Keys in first-seen order with their counts.
#[derive(Default)]
struct OrderedCounter {
    order: Vec<(String, u64)>,
    positions: HashMap<String, usize>,
}

impl OrderedCounter {
    fn add(&mut self, key: &str) {
        match self.positions.get(key) {
            Some(&pos) => self.order[pos].1 += 1,
            None => {
                self.positions.insert(key.to_string(), self.order.len());
                self.order.push((key.to_string(), 1));
            }
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    /// The `n` highest counts; ties stay in first-seen order.
    fn most_common(mut self, n: usize) -> Vec<(String, u64)> {
        self.order.sort_by(|a, b| b.1.cmp(&a.1));
        self.order.truncate(n);
        self.order
    }
}

/// Compute word and participant statistics over `messages`.
pub fn compute_stats(
    messages: &[Message],
    stopwords: &Stopwords,
    options: &StatsOptions,
) -> ChatStats {
    let mut registry = ParticipantRegistry::new();
    let mut words = OrderedCounter::default();
    let mut authors = OrderedCounter::default();
    let mut stats = ChatStats::default();

    for message in messages.iter().filter(|m| m.kind.is_message()) {
        stats.messages += 1;
        registry.observe(message);
        if let Some(author) = &message.author_id {
            authors.add(author);
        }

        let Some(text) = message.text.as_deref().filter(|t| !t.trim().is_empty()) else {
            continue;
        };
        stats.text_messages += 1;

        for token in tokenize(text) {
            if token.chars().count() < options.min_word_len
                || !token.chars().any(char::is_alphabetic)
                || stopwords.contains(&token)
            {
                continue;
            }
            stats.words += 1;
            words.add(&token);
        }
    }

    stats.distinct_words = words.len();
    stats.top_words = words
        .most_common(options.top_words)
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    stats.top_participants = authors
        .most_common(options.top_participants)
        .into_iter()
        .map(|(id, messages)| ParticipantMessages {
            label: registry
                .get(&id)
                .map_or_else(|| id.clone(), |p| p.label().to_string()),
            id,
            messages,
        })
        .collect();

    tracing::info!(
        messages = stats.messages,
        words = stats.words,
        distinct_words = stats.distinct_words,
        "Computed chat statistics"
    );

    stats
}
