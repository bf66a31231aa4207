use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "mdpress";

const DEFAULT_RENDER_DEBOUNCE_MS: u64 = 150;
const DEFAULT_WHEEL_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<EditorConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Quiet window between the last keystroke and a preview re-render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_debounce_ms: Option<u64>,

    /// Quiet window between accepted wheel navigation steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel_debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_preview: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `mdpress config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(&path, format!("# mdpress configuration\n{yaml}"))?;
        Ok(path)
    }

    pub fn render_debounce(&self) -> Duration {
        let ms = self
            .editor
            .as_ref()
            .and_then(|e| e.render_debounce_ms)
            .unwrap_or(DEFAULT_RENDER_DEBOUNCE_MS);
        Duration::from_millis(ms)
    }

    pub fn wheel_debounce(&self) -> Duration {
        let ms = self
            .editor
            .as_ref()
            .and_then(|e| e.wheel_debounce_ms)
            .unwrap_or(DEFAULT_WHEEL_DEBOUNCE_MS);
        Duration::from_millis(ms)
    }

    pub fn show_preview(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.show_preview)
            .unwrap_or(true)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "editor.render_debounce_ms" => {
                let ms = parse_window_ms(key, value)?;
                self.editor
                    .get_or_insert_with(EditorConfig::default)
                    .render_debounce_ms = Some(ms);
            }
            "editor.wheel_debounce_ms" => {
                let ms = parse_window_ms(key, value)?;
                self.editor
                    .get_or_insert_with(EditorConfig::default)
                    .wheel_debounce_ms = Some(ms);
            }
            "defaults.show_preview" => {
                let flag = match value {
                    "true" => true,
                    "false" => false,
                    _ => anyhow::bail!("Invalid value: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .show_preview = Some(flag);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: editor.render_debounce_ms, \
                 editor.wheel_debounce_ms, defaults.show_preview"
            ),
        }
        Ok(())
    }
}

fn parse_window_ms(key: &str, value: &str) -> Result<u64> {
    let ms: u64 = value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid value for {key}: {value}. Must be milliseconds."))?;
    if !(10..=5000).contains(&ms) {
        anyhow::bail!("Invalid value for {key}: {ms}. Must be between 10 and 5000 ms.");
    }
    Ok(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_windows() {
        let config = Config::default();
        assert_eq!(config.render_debounce(), Duration::from_millis(150));
        assert_eq!(config.wheel_debounce(), Duration::from_millis(300));
        assert!(config.show_preview());
    }

    #[test]
    fn test_set_valid_keys() {
        let mut config = Config::default();
        config.set("editor.render_debounce_ms", "200").unwrap();
        config.set("editor.wheel_debounce_ms", "500").unwrap();
        config.set("defaults.show_preview", "false").unwrap();

        assert_eq!(config.render_debounce(), Duration::from_millis(200));
        assert_eq!(config.wheel_debounce(), Duration::from_millis(500));
        assert!(!config.show_preview());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("editor.render_debounce_ms", "fast").is_err());
        assert!(config.set("editor.render_debounce_ms", "0").is_err());
        assert!(config.set("editor.wheel_debounce_ms", "999999").is_err());
        assert!(config.set("defaults.show_preview", "yes").is_err());
        assert!(config.set("no.such.key", "1").is_err());
    }

    #[test]
    fn test_round_trips_through_yaml() {
        let mut config = Config::default();
        config.set("editor.render_debounce_ms", "250").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.render_debounce(), Duration::from_millis(250));
    }
}
