use async_trait::async_trait;
use polyglot_config::translator::{ApiMode, TranslatorConfig};
use polyglot_translator::{
    ProviderMetadata, TranslateError, Translation, Translator, ValidationError,
};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

const NETWORK_ERROR: &str = "Failed to reach the translation service. Please try again.";

#[derive(Clone)]
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    mode: ApiMode,
}

/// Body understood by the pass-through proxy
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest<'a> {
    api_key: &'a str,
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Deserialize)]
struct TranslatedText {
    text: String,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    message: Option<String>,
}

impl DeepLTranslator {
    pub fn new(api_key: String, api_url: String, mode: ApiMode) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
            mode,
        }
    }

    pub fn from_config(config: &TranslatorConfig, api_key: String) -> Self {
        Self::new(api_key, config.endpoint().to_string(), config.mode)
    }

    fn request(&self, text: &str, from: &str, to: &str) -> reqwest::RequestBuilder {
        match self.mode {
            ApiMode::Proxy => self.client.post(&self.api_url).json(&ProxyRequest {
                api_key: &self.api_key,
                text,
                source_lang: from,
                target_lang: to,
            }),
            ApiMode::Direct => {
                let params = [("text", text), ("source_lang", from), ("target_lang", to)];
                self.client
                    .post(&self.api_url)
                    .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
                    .form(&params)
            }
        }
    }
}

/// Map a non-success status and optional `{message}` payload to an error
pub fn error_for_status(status: StatusCode, message: Option<String>) -> TranslateError {
    match status.as_u16() {
        403 => TranslateError::InvalidCredentials,
        429 | 456 => TranslateError::QuotaExceeded,
        code => TranslateError::Provider(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("DeepL API error: {code}")),
        ),
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, TranslateError> {
        if !self.has_credentials() {
            return Err(ValidationError::MissingCredential.into());
        }

        tracing::debug!(from, to, chars = text.len(), "deepl request");

        let response = self.request(text, from, to).send().await.map_err(|e| {
            tracing::warn!("deepl transport error: {e}");
            TranslateError::Provider(NETWORK_ERROR.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            tracing::warn!(%status, to, "deepl returned an error");
            return Err(error_for_status(status, body.message));
        }

        let body: TranslateResponse = response.json().await.map_err(|e| {
            TranslateError::Provider(format!("Failed to parse response: {}", e))
        })?;

        let translated = body
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| TranslateError::Provider("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated.text,
            from: from.to_string(),
            to: to.to_string(),
            provider: "deepl".to_string(),
        })
    }

    fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}
