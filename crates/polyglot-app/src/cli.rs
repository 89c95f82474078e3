use std::path::PathBuf;

use clap::{Parser, Subcommand};
use polyglot_config::Config;
use polyglot_config::translator::ApiMode;
use polyglot_core::{Preferences, language, translate_all};
use polyglot_types::HistoryEntry;

use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Translate text into several languages at once", long_about = None)]
pub struct Cli {
    /// Config profile to load
    #[arg(long, default_value = "main")]
    pub profile: String,

    /// Key-value store file (overrides config)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Translation endpoint (overrides config)
    #[arg(long)]
    pub api_url: Option<String>,

    /// API mode: proxy or direct (overrides config)
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<ApiMode>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate once and print the results
    Translate {
        text: String,
        /// Source language code (defaults to the saved one)
        #[arg(long)]
        from: Option<String>,
        /// Comma separated target codes (defaults to the saved ones)
        #[arg(long, value_delimiter = ',')]
        to: Vec<String>,
    },
    /// Print recent queries
    History,
    /// Print the language catalog
    Languages,
}

fn parse_mode(value: &str) -> Result<ApiMode, String> {
    ApiMode::parse(value).ok_or_else(|| format!("unknown mode {value:?}, expected proxy or direct"))
}

impl Cli {
    /// Apply command line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.store {
            config.storage.path = path.clone();
        }
        if let Some(url) = &self.api_url {
            config.translator.api_url = url.clone();
        }
        if let Some(mode) = self.mode {
            config.translator.mode = mode;
        }
    }
}

/// Resolve `--from`/`--to` against saved preferences
pub fn resolve_languages(
    saved: &Preferences,
    from: Option<&str>,
    to: &[String],
) -> anyhow::Result<Preferences> {
    let source = match from {
        Some(code) => language::find_loose(code)
            .ok_or_else(|| anyhow::anyhow!("unknown source language {code}"))?
            .code
            .to_string(),
        None => saved.source.clone(),
    };

    let targets = if to.is_empty() {
        saved.targets.clone()
    } else {
        to.iter()
            .map(|code| {
                language::find_loose(code)
                    .map(|l| l.code.to_string())
                    .ok_or_else(|| anyhow::anyhow!("unknown target language {code}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    Ok(Preferences { source, targets })
}

pub async fn run_command(state: &AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Translate { text, from, to } => {
            let session = state.restore_session().await;
            let prefs = resolve_languages(&session.preferences, from.as_deref(), &to)?;
            let translator = state.translator(&session.api_key);

            let translations =
                translate_all(translator.as_ref(), &text, &prefs.source, &prefs.targets).await?;

            for code in prefs.effective_targets() {
                if let Some(text) = translations.get(&code) {
                    println!("{:<22} [{code}] {text}", language::display_name(&code));
                }
            }

            state.store.record_history(HistoryEntry {
                query: text.trim().to_string(),
                translations,
                target_codes: prefs.targets,
                source_code: Some(prefs.source),
            })?;
        }
        Command::History => {
            let history = state.store.history();
            if history.is_empty() {
                println!("No history yet.");
            }
            for (i, query) in history.queries().iter().enumerate() {
                println!("{:>3}. {query}", i + 1);
            }
        }
        Command::Languages => {
            for lang in language::LANGUAGES.iter() {
                println!("{:<8} {}", lang.code, lang.name);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_are_applied() {
        let cli = Cli::parse_from([
            "polyglot",
            "--mode",
            "direct",
            "--store",
            "/tmp/store.json",
            "translate",
            "Hello",
            "--to",
            "es,fr",
        ]);

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.translator.mode, ApiMode::Direct);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/store.json"));

        let Some(Command::Translate { text, to, from }) = cli.command else {
            panic!("expected translate command")
        };
        assert_eq!(text, "Hello");
        assert_eq!(from, None);
        assert_eq!(to, vec!["es".to_string(), "fr".to_string()]);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["polyglot", "--mode", "carrier-pigeon"]).is_err());
    }

    #[test]
    fn languages_fall_back_to_saved_preferences() {
        let saved = Preferences::default();
        let prefs = resolve_languages(&saved, Some("de"), &[]).unwrap();
        assert_eq!(prefs.source, "DE");
        assert_eq!(prefs.targets, saved.targets);

        let prefs = resolve_languages(&saved, None, &["fr".to_string()]).unwrap();
        assert_eq!(prefs.source, "EN");
        assert_eq!(prefs.targets, vec!["FR".to_string()]);

        assert!(resolve_languages(&saved, Some("XX"), &[]).is_err());
    }
}
