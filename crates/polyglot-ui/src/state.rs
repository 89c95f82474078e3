use crossterm::style::Stylize;
use polyglot_config::ui::UiConfig;
use polyglot_types::{DisplayTranslation, SpeechStatus};

/// UI-specific state (separate from the app session)
pub struct UiState {
    pub rows: Vec<DisplayTranslation>,
    pub input: String,
    pub speaking: SpeechStatus,
    color: bool,
    history_preview: usize,
}

impl UiState {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            rows: Vec::new(),
            input: String::new(),
            speaking: SpeechStatus::Idle,
            color: config.color,
            history_preview: config.history_preview,
        }
    }

    pub fn is_speaking(&self, code: &str) -> bool {
        matches!(&self.speaking, SpeechStatus::Speaking { code: c, .. } if c == code)
    }

    pub fn preview(&self, query: &str) -> String {
        if query.chars().count() <= self.history_preview {
            return query.to_string();
        }
        let cut: String = query.chars().take(self.history_preview).collect();
        format!("{cut}…")
    }

    pub fn title(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn accent(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dark_grey().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }
}
