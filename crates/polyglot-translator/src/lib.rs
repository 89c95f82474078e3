pub use polyglot_types::LanguageCode;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from the API source identifier into `to`
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, TranslateError>;

    /// Whether a credential is available for outbound calls
    fn has_credentials(&self) -> bool {
        !self.metadata().requires_api_key
    }

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid API key. Please check your DeepL API key.")]
    InvalidCredentials,

    #[error("Quota exceeded. You've reached your DeepL character limit.")]
    QuotaExceeded,

    #[error("{0}")]
    Provider(String),
}

/// Rejections raised before any outbound call is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter some text to translate.")]
    EmptyQuery,

    #[error("Please enter your DeepL API key first.")]
    MissingCredential,

    #[error("Please select at least one target language different from the source language.")]
    NoTargetLanguages,
}
