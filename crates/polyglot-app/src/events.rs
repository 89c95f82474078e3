use kanal::AsyncReceiver;
use polyglot_core::language;
use polyglot_types::{AppEvent, UiEvent};

use crate::context::EventContext;
use crate::state::Session;

pub mod credentials;
pub mod history;
pub mod preferences;
pub mod speak;
pub mod translate;

use credentials::handle_set_api_key;
use history::{handle_select_history, handle_show_history};
use preferences::{handle_add_target, handle_list_languages, handle_remove_target, handle_set_source};
use speak::handle_speak;
use translate::{handle_phrase, handle_translate, handle_translate_finished};

/// App's main loop; owns the session and runs until the UI has been told to shut down
pub async fn event_loop(ctx: EventContext, ui_to_app_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    let mut session = ctx.state.restore_session().await;
    tracing::info!(
        "[EVENT_LOOP] session restored: source {}, {} target(s), {} history entries",
        session.preferences.source,
        session.preferences.targets.len(),
        session.history.len()
    );

    ctx.show(AppEvent::BackendReady).await?;
    ctx.show(AppEvent::ShowPreferences(session.preferences.view()))
        .await?;

    loop {
        let event = ui_to_app_rx.recv().await?;
        tracing::debug!(
            "[EVENT_LOOP] event received: {:?}",
            std::mem::discriminant(&event)
        );

        handle_events(&ctx, &mut session, event).await?;

        if session.can_shut_down() {
            tracing::info!("[EVENT_LOOP] no work in flight, shutting down");
            ctx.state.speaker.cancel();
            ctx.show(AppEvent::Shutdown).await?;
            return Ok(());
        }
    }
}

pub async fn handle_events(
    ctx: &EventContext,
    session: &mut Session,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Ui(event) => handle_ui_event(ctx, session, event).await?,
        AppEvent::TranslateFinished(outcome) => {
            handle_translate_finished(ctx, session, outcome).await?
        }
        // Everything else flows app -> UI only
        other => {
            tracing::warn!("[EVENT_LOOP] ignoring UI-bound event {:?}", std::mem::discriminant(&other));
        }
    }

    Ok(())
}

async fn handle_ui_event(
    ctx: &EventContext,
    session: &mut Session,
    event: UiEvent,
) -> anyhow::Result<()> {
    if session.quitting {
        tracing::debug!("[EVENT_LOOP] quitting, dropping {:?}", std::mem::discriminant(&event));
        return Ok(());
    }

    match event {
        UiEvent::Translate(text) => handle_translate(ctx, session, text).await,
        UiEvent::SetSource(code) => handle_set_source(ctx, session, code).await,
        UiEvent::AddTarget(code) => handle_add_target(ctx, session, code).await,
        UiEvent::RemoveTarget(code) => handle_remove_target(ctx, session, code).await,
        UiEvent::ListLanguages => handle_list_languages(ctx, session).await,
        UiEvent::ShowHistory => handle_show_history(ctx, session).await,
        UiEvent::SelectHistory(index) => handle_select_history(ctx, session, index).await,
        UiEvent::Speak(code) => handle_speak(ctx, session, code).await,
        UiEvent::SetApiKey(key) => handle_set_api_key(ctx, session, key).await,
        UiEvent::ListPhrases => {
            let phrases = language::COMMON_PHRASES
                .iter()
                .map(|p| p.to_string())
                .collect();
            ctx.show(AppEvent::ShowPhrases(phrases)).await
        }
        UiEvent::Phrase(index) => handle_phrase(ctx, session, index).await,
        UiEvent::Quit => {
            tracing::info!("[EVENT_LOOP] quit requested, {} translate(s) pending", session.pending);
            session.quitting = true;
            Ok(())
        }
    }
}
