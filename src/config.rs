use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // API
    pub api_key: String,
    pub api_base: String,
    pub edit_model: String,
    pub chat_model: String,
    pub request_timeout: u64,

    // Prompt overrides (empty string = use the builtin template)
    #[serde(default)]
    pub optimize_prompt: String,
    #[serde(default)]
    pub document_prompt: String,
    #[serde(default)]
    pub analyze_prompt: String,
    #[serde(default)]
    pub dry_prompt: String,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: "".to_string(),
            api_base: "https://api.openai.com".to_string(),
            edit_model: "code-davinci-edit-001".to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            request_timeout: 30,
            optimize_prompt: "".to_string(),
            document_prompt: "".to_string(),
            analyze_prompt: "".to_string(),
            dry_prompt: "".to_string(),
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from file or create default
    pub fn load() -> Result<Self> {
        let config_path = config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    // Backup corrupt file for debugging
                    let backup_path = config_path.with_extension("json.corrupt");
                    let _ = std::fs::rename(&config_path, &backup_path);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        // The config file is the primary credential surface; the
        // environment variable covers ad-hoc shells and CI.
        if config.api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                config.api_key = key;
            }
        }

        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("codetweak")
        .join("config.json")
}
