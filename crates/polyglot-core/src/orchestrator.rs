use futures_util::future::join_all;
use polyglot_translator::{TranslateError, Translator, ValidationError};
use polyglot_types::{LanguageCode, ResultSet};

use crate::language;
use crate::preferences::effective_targets;

/// Translate `query` into every target except the source, all calls in flight at once.
///
/// Validation failures return before any call is made. Otherwise every call is
/// awaited and the first failure in target order fails the whole batch, so a
/// partial result set is never returned.
pub async fn translate_all<T>(
    translator: &T,
    query: &str,
    source_code: &str,
    target_codes: &[LanguageCode],
) -> Result<ResultSet, TranslateError>
where
    T: Translator + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Err(ValidationError::EmptyQuery.into());
    }

    if !translator.has_credentials() {
        return Err(ValidationError::MissingCredential.into());
    }

    let targets = effective_targets(source_code, target_codes);
    if targets.is_empty() {
        return Err(ValidationError::NoTargetLanguages.into());
    }

    let from = language::api_source_code(source_code);
    tracing::info!(from, targets = ?targets, "translating");

    let calls = targets.iter().map(|to| async move {
        let result = translator.translate(query, from, to).await;
        (to, result)
    });

    let mut translations = ResultSet::new();
    for (to, result) in join_all(calls).await {
        match result {
            Ok(translation) => {
                translations.insert(to.clone(), translation.text);
            }
            Err(e) => {
                tracing::warn!(to = %to, "translation failed: {e}");
                return Err(e);
            }
        }
    }

    Ok(translations)
}
