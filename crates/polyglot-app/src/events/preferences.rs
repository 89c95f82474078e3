use polyglot_core::language;
use polyglot_types::AppEvent;

use crate::context::EventContext;
use crate::state::Session;

fn unknown(code: &str) -> String {
    format!("Unknown language code {code}, see :langs")
}

async fn persist_and_show(ctx: &EventContext, session: &Session) -> anyhow::Result<()> {
    if let Err(e) = ctx.state.store.set_preferences(&session.preferences) {
        tracing::error!("failed to persist preferences: {e}");
        ctx.error(format!("Could not save preferences: {e}")).await?;
    }
    ctx.show(AppEvent::ShowPreferences(session.preferences.view()))
        .await
}

pub async fn handle_set_source(
    ctx: &EventContext,
    session: &mut Session,
    code: String,
) -> anyhow::Result<()> {
    let Some(lang) = language::find_loose(&code) else {
        return ctx.error(unknown(&code)).await;
    };

    tracing::info!("source language -> {}", lang.code);
    session.preferences.source = lang.code.to_string();
    persist_and_show(ctx, session).await?;

    // The source may hide or reveal one of the displayed rows
    if !session.translations.is_empty() {
        ctx.show(AppEvent::ShowTranslations(session.rows())).await?;
    }
    Ok(())
}

pub async fn handle_add_target(
    ctx: &EventContext,
    session: &mut Session,
    code: String,
) -> anyhow::Result<()> {
    let Some(lang) = language::find_loose(&code) else {
        return ctx.error(unknown(&code)).await;
    };

    if lang.code == session.preferences.source {
        return ctx
            .error(format!("{} is the source language", lang.name))
            .await;
    }

    if !session.preferences.add_target(lang.code) {
        return ctx.notice(format!("{} is already selected", lang.name)).await;
    }

    persist_and_show(ctx, session).await
}

pub async fn handle_remove_target(
    ctx: &EventContext,
    session: &mut Session,
    code: String,
) -> anyhow::Result<()> {
    let Some(lang) = language::find_loose(&code) else {
        return ctx.error(unknown(&code)).await;
    };

    if !session.preferences.remove_target(lang.code) {
        return ctx.notice(format!("{} is not selected", lang.name)).await;
    }

    persist_and_show(ctx, session).await
}

pub async fn handle_list_languages(ctx: &EventContext, session: &Session) -> anyhow::Result<()> {
    ctx.show(AppEvent::ShowPreferences(session.preferences.view()))
        .await
}
