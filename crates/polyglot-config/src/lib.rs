use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::speech::SpeechConfig;
use self::storage::StorageConfig;
use self::translator::{ApiMode, TranslatorConfig};
use self::ui::UiConfig;

pub mod speech;
pub mod storage;
pub mod translator;
pub mod ui;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub storage: StorageConfig,
    pub speech: SpeechConfig,
    pub ui: UiConfig,
    pub log_format: LogFormat,
}

impl Config {
    /// Override fields from the environment; unset or unparsable values are ignored
    pub fn apply_env(&mut self) {
        if let Some(mode) = env::var("POLYGLOT_API_MODE")
            .ok()
            .and_then(|v| ApiMode::parse(&v))
        {
            self.translator.mode = mode;
        }

        if let Ok(url) = env::var("POLYGLOT_API_URL") {
            self.translator.api_url = url;
        }

        if let Ok(key) = env::var("DEEPL_API_KEY") {
            self.translator.api_key = key;
        }

        if let Ok(path) = env::var("POLYGLOT_STORE") {
            self.storage.path = PathBuf::from(path);
        }

        if let Some(rate) = env::var("POLYGLOT_SPEECH_RATE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.speech.rate = rate;
        }

        self.log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") => LogFormat::Pretty,
            _ => self.log_format,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"translator":{"mode":"direct"},"speech":{"rate":1.2}}"#)
                .unwrap();

        assert_eq!(config.translator.mode, ApiMode::Direct);
        assert_eq!(config.translator.endpoint(), translator::DEFAULT_DEEPL_URL);
        assert_eq!(config.speech.command, "espeak-ng");
        assert!((config.speech.rate - 1.2).abs() < f32::EPSILON);
        assert!(config.ui.color);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn explicit_url_wins_over_mode_default() {
        let config = TranslatorConfig {
            mode: ApiMode::Proxy,
            api_url: "http://127.0.0.1:9000/translate".to_string(),
            api_key: String::new(),
        };
        assert_eq!(config.endpoint(), "http://127.0.0.1:9000/translate");
    }

    #[test]
    fn api_mode_parse_is_case_insensitive() {
        assert_eq!(ApiMode::parse(" Direct "), Some(ApiMode::Direct));
        assert_eq!(ApiMode::parse("PROXY"), Some(ApiMode::Proxy));
        assert_eq!(ApiMode::parse("grpc"), None);
    }
}
