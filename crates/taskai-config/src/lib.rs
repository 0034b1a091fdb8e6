use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const CURRENT_SCHEMA_VERSION: u32 = 2;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables checked, in order, for the model service credential.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub history_window: usize,
    pub chat_context_chars: usize,
    pub summary_input_chars: usize,
    pub preview_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            history_window: 10,
            chat_context_chars: 20_000,
            summary_input_chars: 30_000,
            preview_chars: 5_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub schema_version: u32,
    pub model: String,
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info,taskai_app=debug".to_owned()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            model: "gemini-2.5-flash".to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout_secs: None,
            limits: Limits::default(),
            log_filter: default_log_filter(),
        }
    }
}

/// Reads the process-wide credential. Blank values count as missing.
pub fn api_key_from_env() -> Option<String> {
    resolve_api_key(|name| std::env::var(name).ok())
}

fn resolve_api_key(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_owned())
        .find(|value| !value.is_empty())
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join("config.json"),
        }
    }

    pub fn from_default_location() -> Result<Self> {
        let mut dir = dirs::config_dir().context("failed to resolve config_dir")?;
        dir.push("taskai");
        Ok(Self::from_dir(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_or_init(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            let config = AppConfig::default();
            self.save(&config)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let mut config: AppConfig =
            serde_json::from_str(&raw).context("failed to parse app config json")?;
        if self.migrate(&mut config) {
            self.save(&config)?;
        }
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let text = serde_json::to_string_pretty(config).context("failed to serialize config")?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    fn migrate(&self, config: &mut AppConfig) -> bool {
        if config.schema_version >= CURRENT_SCHEMA_VERSION {
            return false;
        }

        warn!(
            from = config.schema_version,
            to = CURRENT_SCHEMA_VERSION,
            "migrating app config schema"
        );

        // v1 files could carry zeroed budgets, which would send empty prompts.
        let defaults = Limits::default();
        let limits = &mut config.limits;
        if limits.history_window == 0 {
            limits.history_window = defaults.history_window;
        }
        if limits.chat_context_chars == 0 {
            limits.chat_context_chars = defaults.chat_context_chars;
        }
        if limits.summary_input_chars == 0 {
            limits.summary_input_chars = defaults.summary_input_chars;
        }
        if limits.preview_chars == 0 {
            limits.preview_chars = defaults.preview_chars;
        }
        if config.model.trim().is_empty() {
            config.model = AppConfig::default().model;
        }
        config.schema_version = CURRENT_SCHEMA_VERSION;
        true
    }
}
