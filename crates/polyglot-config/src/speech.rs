use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_command() -> String {
    "espeak-ng".to_string()
}

fn default_args() -> Vec<String> {
    ["-v", "{lang}", "-s", "{wpm}", "{text}"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_rate() -> f32 {
    0.9
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Text-to-speech program
    #[serde(default = "default_command")]
    pub command: String,
    /// Argument template; `{lang}`, `{rate}`, `{wpm}` and `{text}` are substituted
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Playback rate relative to normal speed
    #[serde(default = "default_rate")]
    pub rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            command: default_command(),
            args: default_args(),
            rate: default_rate(),
        }
    }
}
