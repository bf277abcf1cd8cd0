use serde::Serialize;

/// One question put to the advice coach and the answer it gave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatExchange {
    pub question: String,
    pub answer: String,
}

/// Append-only conversation history for one session. Clearable on demand.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ChatLog {
    exchanges: Vec<ChatExchange>,
}

impl ChatLog {
    pub fn push(&mut self, question: String, answer: String) {
        self.exchanges.push(ChatExchange { question, answer });
    }

    pub fn get(&self, index: usize) -> Option<&ChatExchange> {
        self.exchanges.get(index)
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }
}
