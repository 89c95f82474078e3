use serde::{Deserialize, Serialize};

fn default_color() -> bool {
    true
}

fn default_history_preview() -> usize {
    40
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_color")]
    pub color: bool,
    /// Max characters of a query shown in the history list
    #[serde(default = "default_history_preview")]
    pub history_preview: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            history_preview: default_history_preview(),
        }
    }
}
