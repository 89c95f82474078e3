use std::io::Write;

use kanal::{AsyncReceiver, AsyncSender};
use polyglot_config::ui::UiConfig;
use polyglot_types::{AppEvent, UiEvent};
use tokio::io::{AsyncBufReadExt, BufReader};

pub mod commands;
pub mod events;
pub mod state;

use self::commands::Command;
use self::events::{Flow, handle_events};
use self::state::UiState;

/// Terminal front-end: stdin lines become `UiEvent`s, app events are printed
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: UiConfig,
) -> anyhow::Result<()> {
    let mut state = UiState::new(&config);
    let interactive = atty::is(atty::Stream::Stdin);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => match commands::parse(&line) {
                        Command::Send(event) => {
                            tracing::debug!("[UI] sending {:?}", std::mem::discriminant(&event));
                            ui_to_app_tx.send(AppEvent::Ui(event)).await?;
                        }
                        Command::Help => print(commands::HELP, interactive),
                        Command::Invalid(message) => print(&state.error(&message), interactive),
                    },
                    None => {
                        tracing::debug!("[UI] stdin closed");
                        stdin_open = false;
                        ui_to_app_tx.send(AppEvent::Ui(UiEvent::Quit)).await?;
                    }
                }
            }
            event = app_to_ui_rx.recv() => {
                match handle_events(event?, &mut state) {
                    Flow::Print(text) => print(&text, interactive),
                    Flow::Quiet => {}
                    Flow::Exit => break,
                }
            }
        }
    }

    Ok(())
}

fn print(text: &str, interactive: bool) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{text}");
    if interactive {
        let _ = write!(stdout, "> ");
    }
    let _ = stdout.flush();
}
