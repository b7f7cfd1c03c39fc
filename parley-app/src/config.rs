use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use parley_core::types::Verbosity;

pub const CONFIG_PATH: &str = "config.yaml";

/// User-facing presentation and behavior settings. The terminal client only
/// acts on `ai_response_length`, `show_timestamps`, and
/// `save_chats_locally`; the rest are kept so a graphical front end reading
/// the same file sees the full set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dark_mode: bool,
    pub font_size: u32,
    pub sound_enabled: bool,
    pub volume: u8,
    pub auto_scroll: bool,
    pub show_timestamps: bool,
    pub save_chats_locally: bool,
    pub ai_response_length: Verbosity,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            font_size: 16,
            sound_enabled: true,
            volume: 100,
            auto_scroll: true,
            show_timestamps: true,
            save_chats_locally: true,
            ai_response_length: Verbosity::Brief,
            language: "en".to_string(),
        }
    }
}

/// API credentials for the six remote backends. Each field can be left
/// empty in the config file and supplied through the matching environment
/// variable instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendKeys {
    pub gemini_api_key: String,
    pub news_api_key: String,
    pub numverify_api_key: String,
    pub abstract_api_key: String,
    pub google_api_key: String,
    pub search_engine_id: String,
    pub youtube_api_key: String,
}

impl BackendKeys {
    /// Environment variables take precedence over the config file.
    pub fn resolved(&self) -> Self {
        Self {
            gemini_api_key: env_or("PARLEY_GEMINI_API_KEY", &self.gemini_api_key),
            news_api_key: env_or("PARLEY_NEWS_API_KEY", &self.news_api_key),
            numverify_api_key: env_or("PARLEY_NUMVERIFY_API_KEY", &self.numverify_api_key),
            abstract_api_key: env_or("PARLEY_ABSTRACT_API_KEY", &self.abstract_api_key),
            google_api_key: env_or("PARLEY_GOOGLE_API_KEY", &self.google_api_key),
            search_engine_id: env_or("PARLEY_SEARCH_ENGINE_ID", &self.search_engine_id),
            youtube_api_key: env_or("PARLEY_YOUTUBE_API_KEY", &self.youtube_api_key),
        }
    }
}

fn env_or(var: &str, fallback: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| fallback.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: Settings,
    pub keys: BackendKeys,
    pub transcripts_dir: String,
    pub chat_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            keys: BackendKeys::default(),
            transcripts_dir: "./data/transcripts".to_string(),
            chat_id: "default".to_string(),
        }
    }
}

impl Config {
    pub fn exists() -> bool {
        std::path::Path::new(CONFIG_PATH).exists()
    }

    pub fn load() -> Result<Self> {
        let content =
            std::fs::read_to_string(CONFIG_PATH).context("Failed to read config.yaml")?;
        serde_yaml::from_str(&content).context("Failed to parse config.yaml")
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(CONFIG_PATH, content).context("Failed to write config.yaml")?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(12..=24).contains(&self.settings.font_size) {
            bail!("font_size must be between 12 and 24");
        }
        if self.settings.volume > 100 {
            bail!("volume must be between 0 and 100");
        }
        if self.chat_id.trim().is_empty() {
            bail!("chat_id cannot be empty");
        }
        if self.transcripts_dir.trim().is_empty() {
            bail!("transcripts_dir cannot be empty");
        }
        Ok(())
    }
}
