//! Append-only conversation log used as generation context.

use serde::{Deserialize, Serialize};

/// One exchange. `question` is empty for open-conversation turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub response: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory(Vec<HistoryEntry>);

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question: impl Into<String>, response: impl Into<String>) {
        self.0.push(HistoryEntry {
            question: question.into(),
            response: response.into(),
        });
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.0.last()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The whole history as a JSON array, for the generation context blob.
    pub fn to_context_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut history = ConversationHistory::new();
        history.record("What's your name?", "Alex");
        history.record("", "I like music");
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().response, "I like music");
        assert_eq!(history.entries()[0].question, "What's your name?");
    }

    #[test]
    fn context_json_is_an_array_of_exchanges() {
        let mut history = ConversationHistory::new();
        history.record("Q", "A");
        let value: serde_json::Value = serde_json::from_str(&history.to_context_json()).unwrap();
        assert_eq!(value[0]["question"], "Q");
        assert_eq!(value[0]["response"], "A");
    }
}
