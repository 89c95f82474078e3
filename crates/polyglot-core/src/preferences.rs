use polyglot_types::{HistoryEntry, LanguageCode, PreferencesView};

use crate::language::{self, DEFAULT_SOURCE, DEFAULT_TARGETS, LANGUAGES};

/// Active source language and selected targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub source: LanguageCode,
    /// Ordered, duplicate-free; may contain the source code
    pub targets: Vec<LanguageCode>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            targets: DEFAULT_TARGETS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Preferences {
    /// Targets used for translation and display, without the source language
    pub fn effective_targets(&self) -> Vec<LanguageCode> {
        effective_targets(&self.source, &self.targets)
    }

    /// Returns false if the code was already selected or is the source
    pub fn add_target(&mut self, code: &str) -> bool {
        if code == self.source || self.targets.iter().any(|c| c == code) {
            return false;
        }
        self.targets.push(code.to_string());
        true
    }

    pub fn remove_target(&mut self, code: &str) -> bool {
        let before = self.targets.len();
        self.targets.retain(|c| c != code);
        self.targets.len() != before
    }

    /// Catalog languages that can still be added
    pub fn available(&self) -> Vec<&'static language::Language> {
        LANGUAGES
            .iter()
            .filter(|l| l.code != self.source && !self.targets.iter().any(|c| c == l.code))
            .collect()
    }

    /// Overwrite the active selection with a history snapshot; codes outside the catalog are skipped
    pub fn apply_history(&mut self, entry: &HistoryEntry) {
        let mut targets: Vec<LanguageCode> = Vec::new();
        for code in &entry.target_codes {
            if language::is_known(code) && !targets.contains(code) {
                targets.push(code.clone());
            }
        }
        self.targets = targets;

        if let Some(source) = entry.source_code.as_ref().filter(|c| language::is_known(c)) {
            self.source = source.clone();
        }
    }

    pub fn view(&self) -> PreferencesView {
        let option = |code: &str| match language::find(code) {
            Some(l) => l.option(),
            None => polyglot_types::LanguageOption {
                code: code.to_string(),
                name: code.to_string(),
            },
        };

        PreferencesView {
            source: option(self.source.as_str()),
            targets: self.effective_targets().iter().map(|c| option(c.as_str())).collect(),
            available: self.available().into_iter().map(|l| l.option()).collect(),
        }
    }
}

pub fn effective_targets(source: &str, targets: &[LanguageCode]) -> Vec<LanguageCode> {
    targets.iter().filter(|c| *c != source).cloned().collect()
}
