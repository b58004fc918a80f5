//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

const REDACTED: &str = "********";

/// Run the config command.
pub fn run_config(
    action: &ConfigAction,
    config_path: Option<PathBuf>,
    settings: Settings,
) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&redacted(settings))
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Init => {
            if config_path.exists() {
                Output::info(&format!("Config already exists at {}", config_path.display()));
            } else {
                Settings::default().save_to(&config_path)?;
                Output::success(&format!("Created default config at {}", config_path.display()));
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Mask every credential so the effective settings can be printed safely.
fn redacted(mut settings: Settings) -> Settings {
    let mask = |value: &mut Option<String>| {
        if value.is_some() {
            *value = Some(REDACTED.to_string());
        }
    };

    mask(&mut settings.credentials.gemini_api_key);
    mask(&mut settings.credentials.openai_api_key);
    mask(&mut settings.vector_index.api_key);
    mask(&mut settings.responders.weather_api_key);
    mask(&mut settings.responders.news_api_key);
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_masks_credentials() {
        let mut settings = Settings::default();
        settings.credentials.gemini_api_key = Some("AIza-secret".to_string());
        settings.responders.news_api_key = Some("news-secret".to_string());

        let shown = toml::to_string_pretty(&redacted(settings)).unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains(REDACTED));
        assert!(shown.contains("students-index"));
    }

    #[test]
    fn test_init_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rosterqa").join("config.toml");

        run_config(&ConfigAction::Init, Some(path.clone()), Settings::default()).unwrap();
        let loaded = Settings::load_file(Some(&path)).unwrap();
        assert_eq!(loaded.server.port, 5000);
    }
}
