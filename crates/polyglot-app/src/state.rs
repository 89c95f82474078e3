use std::sync::Arc;

use polyglot_config::Config;
use polyglot_core::language;
use polyglot_core::{History, KeyValueStore, PreferenceStore, Preferences, Restored};
use polyglot_deepl::DeepLTranslator;
use polyglot_io::Speaker;
use polyglot_translator::Translator;
use polyglot_types::{DisplayTranslation, ResultSet};
use tokio::sync::RwLock;

/// Builds a translator for the current API key
pub type TranslatorFactory = Box<dyn Fn(&str) -> Arc<dyn Translator> + Send + Sync>;

/// Shared, long-lived dependencies
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub store: PreferenceStore<Box<dyn KeyValueStore>>,
    pub speaker: Speaker,
    translator_factory: TranslatorFactory,
}

impl AppState {
    pub fn new(config: Config, store: Box<dyn KeyValueStore>) -> Self {
        let translator_config = config.translator.clone();
        let speaker = Speaker::from_config(&config.speech);
        let factory: TranslatorFactory = Box::new(move |key| {
            Arc::new(DeepLTranslator::from_config(&translator_config, key.to_string()))
        });

        Self::with_parts(config, store, speaker, factory)
    }

    pub fn with_parts(
        config: Config,
        store: Box<dyn KeyValueStore>,
        speaker: Speaker,
        translator_factory: TranslatorFactory,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            store: PreferenceStore::new(store),
            speaker,
            translator_factory,
        }
    }

    pub fn translator(&self, api_key: &str) -> Arc<dyn Translator> {
        (self.translator_factory)(api_key)
    }

    /// Restore persisted slots; a configured key is used when none was saved
    pub async fn restore_session(&self) -> Session {
        let fallback_key = self.config.read().await.translator.api_key.clone();
        Session::from_restored(self.store.restore_on_load(), fallback_key)
    }
}

/// Mutable state of the running front-end, owned by the event loop
#[derive(Debug, Default)]
pub struct Session {
    pub api_key: String,
    pub preferences: Preferences,
    pub history: History,
    pub input: String,
    pub translations: ResultSet,
    pub error: Option<String>,
    /// Translate actions still in flight
    pub pending: usize,
    pub quitting: bool,
}

impl Session {
    pub fn from_restored(restored: Restored, fallback_key: String) -> Self {
        Self {
            api_key: restored.api_key.unwrap_or(fallback_key),
            preferences: restored.preferences,
            history: restored.history,
            ..Self::default()
        }
    }

    /// Current translations in selected-target order, source excluded
    pub fn rows(&self) -> Vec<DisplayTranslation> {
        self.preferences
            .effective_targets()
            .into_iter()
            .filter_map(|code| {
                let text = self.translations.get(&code)?.clone();
                Some(DisplayTranslation {
                    name: language::display_name(&code),
                    code,
                    text,
                })
            })
            .collect()
    }

    pub fn can_shut_down(&self) -> bool {
        self.quitting && self.pending == 0
    }
}
