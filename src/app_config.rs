use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use std::time::Duration;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Translation pipeline config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Conversation history config
    #[serde(default)]
    pub chat: ChatConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TranslationProvider {
    // @provider: Google Translate, keyless public endpoint
    #[default]
    Google,
    // @provider: Google Cloud Translation v2 (API key)
    GoogleCloud,
    // @provider: Offline scripted backend
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::GoogleCloud => "Google Cloud Translation",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::GoogleCloud => "google_cloud".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }

    // @returns: Whether the provider needs an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::GoogleCloud)
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "google" => Ok(Self::Google),
            "google_cloud" => Ok(Self::GoogleCloud),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    /// Backend to forward texts to
    #[serde(default)]
    pub provider: TranslationProvider,

    /// API key, required for `google_cloud`
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL; empty selects the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Source language sent to the backend (`auto` lets it detect)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Language the client texts are written in; targeting it skips translation
    #[serde(default = "default_passthrough_language")]
    pub passthrough_language: String,

    /// Maximum number of texts per backend call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause after a successful batch, before the next one (milliseconds)
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Pause between single-item calls in degraded mode (milliseconds)
    #[serde(default = "default_item_delay_ms")]
    pub item_delay_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl TranslationConfig {
    /// Pause between batches
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Pause between items in degraded mode
    pub fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay_ms)
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            api_key: String::new(),
            endpoint: String::new(),
            source_language: default_source_language(),
            passthrough_language: default_passthrough_language(),
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            item_delay_ms: default_item_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Conversation history limits
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatConfig {
    /// Turns kept per session; older turns are evicted
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    /// Turns handed to the language model as context
    #[serde(default = "default_history_messages")]
    pub history_messages: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
            history_messages: default_history_messages(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_passthrough_language() -> String {
    crate::language_utils::DEFAULT_TARGET.to_string()
}

fn default_batch_size() -> usize {
    crate::translation::chunker::DEFAULT_BATCH_SIZE
}

fn default_batch_delay_ms() -> u64 {
    100
}

fn default_item_delay_ms() -> u64 {
    50
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_messages() -> usize {
    10
}

fn default_history_messages() -> usize {
    2
}

impl Config {
    /// Load the configuration from `path`, writing the defaults there first if
    /// the file does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let translation = &self.translation;

        if translation.batch_size == 0 {
            return Err(anyhow!("Batch size must be at least 1"));
        }

        if translation.timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be at least 1 second"));
        }

        if translation.passthrough_language.trim().is_empty() {
            return Err(anyhow!("Passthrough language cannot be empty"));
        }

        // Validate API key for providers that need one
        if translation.provider.requires_api_key() && translation.api_key.trim().is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider",
                translation.provider.display_name()
            ));
        }

        if self.chat.max_messages == 0 {
            return Err(anyhow!("Chat history must keep at least one message"));
        }

        if self.chat.history_messages > self.chat.max_messages {
            return Err(anyhow!(
                "Chat history_messages ({}) cannot exceed max_messages ({})",
                self.chat.history_messages,
                self.chat.max_messages
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            translation: TranslationConfig::default(),
            chat: ChatConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
