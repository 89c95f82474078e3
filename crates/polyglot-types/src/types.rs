use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// API-facing language identifier, e.g. `"EN-US"` or `"PT-BR"`
pub type LanguageCode = String;

/// Translations of one query keyed by target language code
pub type ResultSet = BTreeMap<LanguageCode, String>;

/// Snapshot of one successful translate action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub translations: ResultSet,
    /// Selected target list at the time of the action, unfiltered
    #[serde(rename = "languages")]
    pub target_codes: Vec<LanguageCode>,
    #[serde(
        rename = "sourceLanguage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_code: Option<LanguageCode>,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Sent by the UI loop, handled by the event loop
    Ui(UiEvent),
    /// A spawned translate action finished
    TranslateFinished(TranslateOutcome),
    Translating {
        query: String,
        targets: usize,
    },
    ShowTranslations(Vec<DisplayTranslation>),
    ShowError(String),
    ShowNotice(String),
    ShowPreferences(PreferencesView),
    ShowHistory(Vec<String>),
    ShowPhrases(Vec<String>),
    SetInput(String),
    Speech(SpeechStatus),
    BackendReady,
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Translate(String),
    SetSource(LanguageCode),
    AddTarget(LanguageCode),
    RemoveTarget(LanguageCode),
    ListLanguages,
    ShowHistory,
    SelectHistory(usize),
    Speak(LanguageCode),
    SetApiKey(String),
    ListPhrases,
    Phrase(usize),
    Quit,
}

#[derive(Debug, Clone)]
pub struct TranslateOutcome {
    pub query: String,
    pub source_code: LanguageCode,
    pub target_codes: Vec<LanguageCode>,
    pub result: Result<ResultSet, TranslateFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateFailure {
    /// User-facing text of the error
    pub message: String,
    /// No call was made because the API key is missing
    pub missing_credential: bool,
}

/// One rendered translation row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTranslation {
    pub code: LanguageCode,
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: LanguageCode,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesView {
    pub source: LanguageOption,
    pub targets: Vec<LanguageOption>,
    pub available: Vec<LanguageOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpeechStatus {
    #[default]
    Idle,
    Speaking {
        code: LanguageCode,
        tag: String,
    },
}
