use crate::context::EventContext;
use crate::state::Session;

pub async fn handle_set_api_key(
    ctx: &EventContext,
    session: &mut Session,
    key: String,
) -> anyhow::Result<()> {
    match ctx.state.store.set_api_key(&key) {
        Ok(true) => {
            tracing::info!("api key updated");
            session.api_key = key;
            ctx.notice("API key saved.").await
        }
        Ok(false) => ctx.error("The API key cannot be blank.").await,
        Err(e) => {
            tracing::error!("failed to persist api key: {e}");
            ctx.error(format!("Could not save the API key: {e}")).await
        }
    }
}
