use polyglot_types::AppEvent;

use crate::context::EventContext;
use crate::state::Session;

pub async fn handle_show_history(ctx: &EventContext, session: &Session) -> anyhow::Result<()> {
    ctx.show(AppEvent::ShowHistory(session.history.queries()))
        .await
}

/// Restore query, results and language selection from a history entry
pub async fn handle_select_history(
    ctx: &EventContext,
    session: &mut Session,
    index: usize,
) -> anyhow::Result<()> {
    let Some(entry) = session.history.get(index).cloned() else {
        return ctx
            .error(format!("No history entry number {}", index + 1))
            .await;
    };

    tracing::debug!("restoring history entry {index}: {:?}", entry.query);

    session.input = entry.query.clone();
    session.translations = entry.translations.clone();
    session.error = None;
    session.preferences.apply_history(&entry);

    if let Err(e) = ctx.state.store.set_preferences(&session.preferences) {
        tracing::error!("failed to persist restored preferences: {e}");
    }

    ctx.show(AppEvent::SetInput(entry.query)).await?;
    ctx.show(AppEvent::ShowPreferences(session.preferences.view()))
        .await?;
    ctx.show(AppEvent::ShowTranslations(session.rows())).await
}
