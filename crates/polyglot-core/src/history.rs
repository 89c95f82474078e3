use polyglot_types::HistoryEntry;
use serde::{Deserialize, Serialize};

pub const MAX_HISTORY: usize = 15;

/// Recent queries, newest first, unique by case-insensitive query text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<HistoryEntry>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored entries, keeping at most [`MAX_HISTORY`]
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(MAX_HISTORY);
        Self(entries)
    }

    /// Prepend `entry`, dropping older entries with the same query
    pub fn record(&mut self, entry: HistoryEntry) {
        let query = entry.query.to_lowercase();
        self.0.retain(|h| h.query.to_lowercase() != query);
        self.0.insert(0, entry);
        self.0.truncate(MAX_HISTORY);
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.0.get(index)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    pub fn queries(&self) -> Vec<String> {
        self.0.iter().map(|h| h.query.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use polyglot_types::ResultSet;

    use super::*;

    fn entry(query: &str, es: &str) -> HistoryEntry {
        HistoryEntry {
            query: query.to_string(),
            translations: ResultSet::from([("ES".to_string(), es.to_string())]),
            target_codes: vec!["ES".to_string()],
            source_code: Some("EN".to_string()),
        }
    }

    #[test]
    fn repeated_query_keeps_one_entry_with_latest_snapshot() {
        let mut history = History::new();
        history.record(entry("Hello", "Hola"));
        history.record(entry("Hello", "Buenas"));
        history.record(entry("Hello", "Qué tal"));

        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0).unwrap().translations["ES"], "Qué tal");
    }

    #[test]
    fn duplicate_detection_ignores_case() {
        let mut history = History::new();
        history.record(entry("Thank you", "Gracias"));
        history.record(entry("Goodbye", "Adiós"));
        history.record(entry("THANK YOU", "Muchas gracias"));

        assert_eq!(history.queries(), vec!["THANK YOU", "Goodbye"]);
    }

    #[test]
    fn capped_at_fifteen_newest_first() {
        let mut history = History::new();
        for i in 0..20 {
            history.record(entry(&format!("query {i}"), "x"));
        }

        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.get(0).unwrap().query, "query 19");
        assert_eq!(history.get(14).unwrap().query, "query 5");
    }

    #[test]
    fn from_entries_truncates_oversized_lists() {
        let entries = (0..18).map(|i| entry(&format!("q{i}"), "x")).collect();
        let history = History::from_entries(entries);
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.get(0).unwrap().query, "q0");
    }
}
