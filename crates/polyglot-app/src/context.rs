use std::sync::Arc;

use kanal::AsyncSender;
use polyglot_types::AppEvent;

use crate::state::AppState;

/// Dependencies every event handler needs
#[derive(Clone)]
pub struct EventContext {
    pub state: Arc<AppState>,
    /// Rendered output for the UI loop
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    /// Lets spawned work post results back into the event loop
    pub ui_to_app_tx: AsyncSender<AppEvent>,
}

impl EventContext {
    pub fn new(
        state: Arc<AppState>,
        app_to_ui_tx: AsyncSender<AppEvent>,
        ui_to_app_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            state,
            app_to_ui_tx,
            ui_to_app_tx,
        }
    }

    pub async fn show(&self, event: AppEvent) -> anyhow::Result<()> {
        self.app_to_ui_tx.send(event).await?;
        Ok(())
    }

    pub async fn error(&self, message: impl Into<String>) -> anyhow::Result<()> {
        self.show(AppEvent::ShowError(message.into())).await
    }

    pub async fn notice(&self, message: impl Into<String>) -> anyhow::Result<()> {
        self.show(AppEvent::ShowNotice(message.into())).await
    }
}
