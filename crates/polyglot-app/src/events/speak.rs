use polyglot_core::language;

use crate::context::EventContext;
use crate::state::Session;

/// Read the displayed translation for `code` aloud
pub async fn handle_speak(
    ctx: &EventContext,
    session: &Session,
    code: String,
) -> anyhow::Result<()> {
    let Some(lang) = language::find_loose(&code) else {
        return ctx.error(format!("Unknown language code {code}")).await;
    };

    let Some(text) = session.translations.get(lang.code) else {
        return ctx
            .error(format!("No {} translation to read", lang.name))
            .await;
    };

    if !ctx.state.speaker.is_enabled() {
        return ctx.notice("Speech playback is disabled").await;
    }

    ctx.state.speaker.speak(
        text.clone(),
        lang.code.to_string(),
        lang.speech_tag.to_string(),
    );
    Ok(())
}
