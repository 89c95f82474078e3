use std::fmt::Write;

use polyglot_types::{AppEvent, LanguageOption, PreferencesView, SpeechStatus};

use crate::state::UiState;

/// What the UI loop does after an app event
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Print(String),
    Quiet,
    Exit,
}

pub fn handle_events(event: AppEvent, state: &mut UiState) -> Flow {
    match event {
        AppEvent::BackendReady => {
            Flow::Print(state.dim("Ready. Type text to translate, :help for commands."))
        }
        AppEvent::Translating { query, targets } => Flow::Print(state.dim(&format!(
            "Translating \"{query}\" into {targets} language{}...",
            if targets == 1 { "" } else { "s" }
        ))),
        AppEvent::ShowTranslations(rows) => {
            state.rows = rows;
            Flow::Print(render_rows(state))
        }
        AppEvent::ShowError(message) => Flow::Print(state.error(&message)),
        AppEvent::ShowNotice(message) => Flow::Print(message),
        AppEvent::ShowPreferences(view) => Flow::Print(render_preferences(state, &view)),
        AppEvent::ShowHistory(queries) => {
            if queries.is_empty() {
                return Flow::Print(state.dim("No history yet."));
            }
            let mut out = state.title("Recent");
            for (i, query) in queries.iter().enumerate() {
                let _ = write!(out, "\n{:>3}. {}", i + 1, state.preview(query));
            }
            Flow::Print(out)
        }
        AppEvent::ShowPhrases(phrases) => {
            let mut out = state.title("Quick phrases");
            for (i, phrase) in phrases.iter().enumerate() {
                let _ = write!(out, "\n{:>3}. {phrase}", i + 1);
            }
            Flow::Print(out)
        }
        AppEvent::SetInput(text) => {
            let out = format!("{} {text}", state.title(">"));
            state.input = text;
            Flow::Print(out)
        }
        AppEvent::Speech(status) => {
            let out = match &status {
                SpeechStatus::Speaking { code, tag } => {
                    Flow::Print(state.accent(&format!("♪ speaking {code} ({tag})")))
                }
                SpeechStatus::Idle => Flow::Quiet,
            };
            state.speaking = status;
            out
        }
        AppEvent::Shutdown => Flow::Exit,
        // Handled by the app event loop
        AppEvent::Ui(_) | AppEvent::TranslateFinished(_) => Flow::Quiet,
    }
}

fn render_rows(state: &UiState) -> String {
    let width = state
        .rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in &state.rows {
        let marker = if state.is_speaking(&row.code) { "♪" } else { " " };
        let label = format!("{:<width$}", row.name);
        let _ = writeln!(
            out,
            "{marker} {} {} {}",
            state.accent(&label),
            state.dim(&format!("[{}]", row.code)),
            row.text
        );
    }
    out.trim_end().to_string()
}

fn render_preferences(state: &UiState, view: &PreferencesView) -> String {
    let list = |options: &[LanguageOption]| {
        options
            .iter()
            .map(|o| format!("{} ({})", o.name, o.code))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let targets = if view.targets.is_empty() {
        state.error("No target languages selected")
    } else {
        list(&view.targets)
    };

    format!(
        "{} {} ({})\n{} {}\n{} {}",
        state.title("Source:"),
        view.source.name,
        view.source.code,
        state.title("Targets:"),
        targets,
        state.title("Available:"),
        state.dim(&list(&view.available)),
    )
}
