use std::sync::Arc;

use kanal::AsyncSender;
use polyglot_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Forward speech state changes to the UI until cancelled
pub async fn speech_watcher(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut status_rx = state.speaker.subscribe();

    loop {
        tokio::select! {
            changed = status_rx.changed() => {
                if changed.is_err() {
                    tracing::debug!("speech status channel closed");
                    break;
                }
                let status = status_rx.borrow_and_update().clone();
                tracing::debug!("speech status: {status:?}");
                if let Err(e) = event_tx.send(AppEvent::Speech(status)).await {
                    tracing::warn!("failed to forward speech status: {e}");
                    break;
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("speech watcher stopping");
                break;
            }
        }
    }

    Ok(())
}
