//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Recording platform (Fathom) settings
    #[serde(default)]
    pub fathom: FathomSettings,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Remote summary store settings
    #[serde(default)]
    pub remote: RemoteSettings,

    /// TUI settings
    #[serde(default)]
    pub tui: TuiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Data directory for the local store and logs
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FathomSettings {
    /// API key sent as X-Api-Key
    #[serde(default)]
    pub api_key: String,

    /// REST API base URL
    #[serde(default = "default_fathom_base_url")]
    pub base_url: String,

    /// oEmbed endpoint used for thumbnails and the player embed
    #[serde(default = "default_oembed_url")]
    pub oembed_url: String,

    /// Timeout for the oEmbed lookup in seconds
    #[serde(default = "default_oembed_timeout_secs")]
    pub oembed_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (for cloud providers)
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (for local/custom providers)
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Project URL of the hosted database and auth provider
    #[serde(default)]
    pub url: String,

    /// Public anon key sent as the apikey header
    #[serde(default)]
    pub anon_key: String,

    /// Table holding cached summaries
    #[serde(default = "default_summary_table")]
    pub table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiSettings {
    /// Show speaker names in the transcript tab
    #[serde(default = "default_true")]
    pub show_speakers: bool,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "stokemeet", "stokemeet")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/stokemeet"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fathom_base_url() -> String {
    "https://api.fathom.ai/external/v1".to_string()
}

fn default_oembed_url() -> String {
    "https://fathom.video/oembed".to_string()
}

fn default_oembed_timeout_secs() -> u64 {
    5
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_summary_table() -> String {
    "meeting_summaries".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for FathomSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_fathom_base_url(),
            oembed_url: default_oembed_url(),
            oembed_timeout_secs: default_oembed_timeout_secs(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
        }
    }
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: default_summary_table(),
        }
    }
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            show_speakers: true,
        }
    }
}

impl RemoteSettings {
    /// Whether both the project URL and the anon key are set.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides to blank secrets.
    fn apply_env_overrides(&mut self) {
        fill_from_env(&mut self.fathom.api_key, "STOKEMEET_FATHOM_API_KEY");
        fill_from_env(&mut self.llm.api_key, "STOKEMEET_GEMINI_API_KEY");
        fill_from_env(&mut self.remote.url, "STOKEMEET_SUPABASE_URL");
        fill_from_env(&mut self.remote.anon_key, "STOKEMEET_SUPABASE_ANON_KEY");
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "stokemeet", "stokemeet")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the local store path
    pub fn database_path(&self) -> PathBuf {
        self.general.data_dir.join("stokemeet.db")
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.general.data_dir.join("stokemeet.log")
    }

    /// Ensure all required directories exist
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.general.data_dir)?;
        Ok(())
    }
}

fn fill_from_env(target: &mut String, var: &str) {
    if !target.trim().is_empty() {
        return;
    }
    if let Ok(value) = std::env::var(var) {
        if !value.trim().is_empty() {
            *target = value;
        }
    }
}
