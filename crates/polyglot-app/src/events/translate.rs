use polyglot_core::{language, translate_all};
use polyglot_translator::{TranslateError, ValidationError};
use polyglot_types::{AppEvent, HistoryEntry, TranslateFailure, TranslateOutcome};

use crate::context::EventContext;
use crate::state::Session;

/// Start a translate action; the outcome comes back as `TranslateFinished`
pub async fn handle_translate(
    ctx: &EventContext,
    session: &mut Session,
    text: String,
) -> anyhow::Result<()> {
    let query = text.trim().to_string();

    session.input = text;

    let translator = ctx.state.translator(&session.api_key);
    let source = session.preferences.source.clone();
    let targets = session.preferences.targets.clone();

    // Blank input and a missing key are rejected with the previous results kept
    if !query.is_empty() && translator.has_credentials() {
        session.translations.clear();
        session.error = None;

        let effective = session.preferences.effective_targets().len();
        if effective > 0 {
            ctx.show(AppEvent::Translating {
                query: query.clone(),
                targets: effective,
            })
            .await?;
        }
    }

    session.pending += 1;
    let tx = ctx.ui_to_app_tx.clone();

    tokio::spawn(async move {
        let result = translate_all(translator.as_ref(), &query, &source, &targets)
            .await
            .map_err(|e| TranslateFailure {
                missing_credential: e
                    == TranslateError::Validation(ValidationError::MissingCredential),
                message: e.to_string(),
            });

        let outcome = TranslateOutcome {
            query,
            source_code: source,
            target_codes: targets,
            result,
        };

        if let Err(e) = tx.send(AppEvent::TranslateFinished(outcome)).await {
            tracing::error!("failed to post translate outcome: {e}");
        }
    });

    Ok(())
}

/// Show the outcome and, on success, record it in history
pub async fn handle_translate_finished(
    ctx: &EventContext,
    session: &mut Session,
    outcome: TranslateOutcome,
) -> anyhow::Result<()> {
    session.pending = session.pending.saturating_sub(1);

    let translations = match outcome.result {
        Ok(translations) => translations,
        Err(failure) => {
            tracing::info!("translate action failed: {}", failure.message);
            session.error = Some(failure.message.clone());
            ctx.error(failure.message).await?;
            if failure.missing_credential {
                ctx.notice("Save one with :key <KEY> (free keys at https://www.deepl.com/pro-api).")
                    .await?;
            }
            return Ok(());
        }
    };

    session.translations = translations.clone();
    session.error = None;

    let entry = HistoryEntry {
        query: outcome.query,
        translations,
        target_codes: outcome.target_codes,
        source_code: Some(outcome.source_code),
    };

    // The session copy is authoritative; it keeps entries a failed write missed
    session.history.record(entry);
    if let Err(e) = ctx.state.store.set_history(&session.history) {
        tracing::error!("failed to persist history: {e}");
    }

    ctx.show(AppEvent::ShowTranslations(session.rows())).await
}

/// Translate one of the built-in quick phrases
pub async fn handle_phrase(
    ctx: &EventContext,
    session: &mut Session,
    index: usize,
) -> anyhow::Result<()> {
    match language::COMMON_PHRASES.get(index) {
        Some(phrase) => {
            ctx.show(AppEvent::SetInput(phrase.to_string())).await?;
            handle_translate(ctx, session, phrase.to_string()).await
        }
        None => ctx.error(format!("No phrase number {}", index + 1)).await,
    }
}
