use std::fs;
use std::path::{Path, PathBuf};

use polyglot_config::Config;
use serde::{Deserialize, Serialize};

/// `<config dir>/polyglot/profiles`
pub fn profiles_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no user config directory on this platform"))?;
    Ok(base.join("polyglot").join("profiles"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Create the profiles folder and a default main profile if missing
pub fn init_user_config(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;

    let main_profile = dir.join("main.json");

    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: Config::default(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(dir: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = dir.join(format!("{name}.json"));

    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
    let main_file = dir.join("main.json");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(Config::default())
    }
}

/// Profile config with environment overrides applied on top
pub fn load_config(name: &str) -> anyhow::Result<Config> {
    let dir = profiles_dir()?;
    init_user_config(&dir)?;

    let mut config = load_user_profile(&dir, name)?;
    config.apply_env();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use polyglot_config::translator::ApiMode;

    use super::*;

    #[test]
    fn first_run_creates_main_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = dir.path().join("profiles");

        init_user_config(&profiles).unwrap();

        let config = load_user_profile(&profiles, "main").unwrap();
        assert_eq!(config.translator.mode, ApiMode::Proxy);
        assert!(profiles.join("main.json").exists());
    }

    #[test]
    fn unknown_profile_falls_back_to_main() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("main.json"),
            r#"{"name":"main","value":{"translator":{"mode":"direct"}}}"#,
        )
        .unwrap();

        let config = load_user_profile(dir.path(), "travel").unwrap();
        assert_eq!(config.translator.mode, ApiMode::Direct);
    }

    #[test]
    fn broken_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.json"), "{ nope").unwrap();
        assert!(load_user_profile(dir.path(), "main").is_err());
    }
}
