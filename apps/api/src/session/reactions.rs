use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Like,
    Dislike,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReactionCount {
    pub likes: u32,
    pub dislikes: u32,
}

/// Like/dislike counters per content kind (`resume`, `chat_0`, ...).
/// Counters come into existence at zero on first use.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Reactions {
    counts: BTreeMap<String, ReactionCount>,
}

impl Reactions {
    pub fn record(&mut self, kind: &str, reaction: Reaction) -> ReactionCount {
        let count = self.counts.entry(kind.to_string()).or_default();
        match reaction {
            Reaction::Like => count.likes = count.likes.saturating_add(1),
            Reaction::Dislike => count.dislikes = count.dislikes.saturating_add(1),
        }
        *count
    }
}
