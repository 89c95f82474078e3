use serde::{Deserialize, Serialize};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000/api/translate";
pub const DEFAULT_DEEPL_URL: &str = "https://api-free.deepl.com/v2/translate";

/// How outbound translation calls reach DeepL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// JSON body with the key inline, forwarded by a pass-through proxy
    #[default]
    Proxy,
    /// DeepL REST API with the key in the Authorization header
    Direct,
}

impl ApiMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "proxy" => Some(Self::Proxy),
            "direct" => Some(Self::Direct),
            _ => None,
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            Self::Proxy => DEFAULT_PROXY_URL,
            Self::Direct => DEFAULT_DEEPL_URL,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TranslatorConfig {
    pub mode: ApiMode,
    /// Empty means the default endpoint of `mode`
    pub api_url: String,
    /// Used only when no key has been saved through the UI
    pub api_key: String,
}

impl TranslatorConfig {
    pub fn endpoint(&self) -> &str {
        if self.api_url.trim().is_empty() {
            self.mode.default_url()
        } else {
            &self.api_url
        }
    }
}
