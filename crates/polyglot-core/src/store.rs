use std::collections::BTreeMap;
use std::sync::Mutex;

use polyglot_types::{HistoryEntry, LanguageCode};

use crate::error::StoreError;
use crate::history::History;
use crate::language::{self, DEFAULT_SOURCE};
use crate::preferences::Preferences;

pub const API_KEY: &str = "deepl_api_key";
pub const SOURCE_LANGUAGE: &str = "source_language";
pub const SELECTED_LANGUAGES: &str = "selected_languages";
pub const TRANSLATION_HISTORY: &str = "translation_history";

/// String-keyed persistence medium; every `set` is durable when it returns
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-process store, nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Everything read back at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restored {
    pub api_key: Option<String>,
    pub preferences: Preferences,
    pub history: History,
}

/// Typed access to the preference and history slots
pub struct PreferenceStore<S> {
    store: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Read all slots; missing or malformed values become defaults
    pub fn restore_on_load(&self) -> Restored {
        let restored = Restored {
            api_key: self.api_key(),
            preferences: Preferences {
                source: self.source(),
                targets: self.targets(),
            },
            history: self.history(),
        };

        tracing::debug!(
            source = %restored.preferences.source,
            targets = restored.preferences.targets.len(),
            history = restored.history.len(),
            "restored preferences"
        );

        restored
    }

    pub fn api_key(&self) -> Option<String> {
        self.store
            .get(API_KEY)
            .filter(|key| !key.trim().is_empty())
    }

    /// Blank keys are not persisted; returns whether the key was saved
    pub fn set_api_key(&self, key: &str) -> Result<bool, StoreError> {
        if key.trim().is_empty() {
            return Ok(false);
        }
        self.store.set(API_KEY, key)?;
        Ok(true)
    }

    pub fn source(&self) -> LanguageCode {
        match self.store.get(SOURCE_LANGUAGE) {
            Some(code) if language::is_known(&code) => code,
            Some(code) => {
                tracing::warn!("ignoring unknown stored source language {code:?}");
                DEFAULT_SOURCE.to_string()
            }
            None => DEFAULT_SOURCE.to_string(),
        }
    }

    pub fn set_source(&self, code: &str) -> Result<(), StoreError> {
        self.store.set(SOURCE_LANGUAGE, code)
    }

    pub fn targets(&self) -> Vec<LanguageCode> {
        let Some(raw) = self.store.get(SELECTED_LANGUAGES) else {
            return Preferences::default().targets;
        };

        match serde_json::from_str::<Vec<LanguageCode>>(&raw) {
            Ok(codes) => {
                let mut targets: Vec<LanguageCode> = Vec::with_capacity(codes.len());
                for code in codes {
                    if language::is_known(&code) && !targets.contains(&code) {
                        targets.push(code);
                    }
                }
                targets
            }
            Err(e) => {
                tracing::warn!("malformed stored target languages: {e}");
                Preferences::default().targets
            }
        }
    }

    pub fn set_targets(&self, codes: &[LanguageCode]) -> Result<(), StoreError> {
        self.store
            .set(SELECTED_LANGUAGES, &serde_json::to_string(codes)?)
    }

    pub fn set_preferences(&self, preferences: &Preferences) -> Result<(), StoreError> {
        self.set_source(&preferences.source)?;
        self.set_targets(&preferences.targets)
    }

    pub fn history(&self) -> History {
        let Some(raw) = self.store.get(TRANSLATION_HISTORY) else {
            return History::new();
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => History::from_entries(entries),
            Err(e) => {
                tracing::warn!("malformed stored history: {e}");
                History::new()
            }
        }
    }

    pub fn set_history(&self, history: &History) -> Result<(), StoreError> {
        self.store
            .set(TRANSLATION_HISTORY, &serde_json::to_string(history)?)
    }

    /// Apply the de-duplicating, bounded insert and write the list back
    pub fn record_history(&self, entry: HistoryEntry) -> Result<History, StoreError> {
        let mut history = self.history();
        history.record(entry);
        self.set_history(&history)?;
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use polyglot_types::ResultSet;

    use super::*;

    fn store() -> PreferenceStore<MemoryStore> {
        PreferenceStore::new(MemoryStore::new())
    }

    fn entry(query: &str) -> HistoryEntry {
        HistoryEntry {
            query: query.to_string(),
            translations: ResultSet::from([("ES".to_string(), format!("{query} (es)"))]),
            target_codes: vec!["ES".to_string(), "DE".to_string()],
            source_code: Some("EN".to_string()),
        }
    }

    #[test]
    fn empty_store_restores_defaults() {
        let restored = store().restore_on_load();
        assert_eq!(restored, Restored::default());
        assert_eq!(restored.preferences.source, "EN");
        assert_eq!(restored.preferences.targets, vec!["ES", "DE", "RU"]);
        assert!(restored.api_key.is_none());
    }

    #[test]
    fn malformed_slots_fall_back_independently() {
        let prefs = store();
        prefs.inner().set(SOURCE_LANGUAGE, "KLINGON").unwrap();
        prefs.inner().set(SELECTED_LANGUAGES, "not json").unwrap();
        prefs.inner().set(TRANSLATION_HISTORY, "{\"query\":1}").unwrap();
        prefs.inner().set(API_KEY, "abc:fx").unwrap();

        let restored = prefs.restore_on_load();
        assert_eq!(restored.preferences, Preferences::default());
        assert!(restored.history.is_empty());
        assert_eq!(restored.api_key.as_deref(), Some("abc:fx"));
    }

    #[test]
    fn stored_targets_drop_unknown_codes_and_duplicates() {
        let prefs = store();
        prefs
            .inner()
            .set(SELECTED_LANGUAGES, r#"["FR","XX","FR","JA"]"#)
            .unwrap();
        assert_eq!(prefs.targets(), vec!["FR", "JA"]);
    }

    #[test]
    fn setters_write_through() {
        let prefs = store();
        prefs.set_source("DE").unwrap();
        prefs
            .set_targets(&["EN".to_string(), "PT-BR".to_string()])
            .unwrap();

        assert_eq!(prefs.inner().get(SOURCE_LANGUAGE).as_deref(), Some("DE"));
        assert_eq!(
            prefs.inner().get(SELECTED_LANGUAGES).as_deref(),
            Some(r#"["EN","PT-BR"]"#)
        );

        let restored = prefs.restore_on_load();
        assert_eq!(restored.preferences.source, "DE");
        assert_eq!(restored.preferences.targets, vec!["EN", "PT-BR"]);
    }

    #[test]
    fn blank_api_key_is_not_saved() {
        let prefs = store();
        assert!(!prefs.set_api_key("   ").unwrap());
        assert!(prefs.api_key().is_none());
        assert!(prefs.set_api_key("key:fx").unwrap());
        assert_eq!(prefs.api_key().as_deref(), Some("key:fx"));
    }

    #[test]
    fn record_history_persists_and_dedupes() {
        let prefs = store();
        prefs.record_history(entry("Hello")).unwrap();
        prefs.record_history(entry("Goodbye")).unwrap();
        let history = prefs.record_history(entry("hello")).unwrap();

        assert_eq!(history.queries(), vec!["hello", "Goodbye"]);
        assert_eq!(prefs.history(), history);
    }

    #[test]
    fn stored_history_round_trips_exactly() {
        let prefs = store();
        let original = entry("Goodbye");
        prefs.record_history(original.clone()).unwrap();

        let restored = prefs.restore_on_load();
        assert_eq!(restored.history.get(0), Some(&original));
    }
}
