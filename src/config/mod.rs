// Configuration management for OndaTV
// Handles loading/saving settings, with sensible defaults when config is missing

use anyhow::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the persisted slots live.
    pub data_dir: PathBuf,
    pub station: StationConfig,
    pub live: LiveConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    pub name: String,
    pub tagline: String,
}

/// Live ingest settings. The RTMP fields are display-only - they exist so
/// the operator can copy them into OBS, nothing here is ever contacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveConfig {
    /// HLS manifest the player tunes to when live mode is switched on.
    pub hls_url: Option<String>,
    pub rtmp_server: String,
    pub rtmp_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub show_notifications: bool,
    /// How many upcoming programs the player panel lists.
    pub upcoming_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ondatv");

        Self {
            data_dir,
            station: StationConfig {
                name: "OndaTV".to_string(),
                tagline: "Ao vivo, Auto VJ e Grade".to_string(),
            },
            live: LiveConfig {
                hls_url: Some("https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8".to_string()),
                rtmp_server: "rtmp://seu-servidor/live".to_string(),
                rtmp_key: "canal123".to_string(),
            },
            ui: UiConfig {
                show_notifications: true,
                upcoming_limit: 5,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("ondatv");

        Ok(config_dir.join("config.toml"))
    }
}

/// Viewer theme preference, persisted in its own slot like the web build
/// did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "claro",
            Theme::Dark => "escuro",
        }
    }
}
