use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Upper bound for `http.retry_count`
pub const MAX_RETRY_COUNT: u32 = 10;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language tag sent to the translation service
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language tag sent to the translation service
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Delay between two reads of the selection, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Selections longer than this many characters are rejected
    #[serde(default = "default_max_selection_length")]
    pub max_selection_length: usize,

    /// Space-free selections shorter than this are looked up in the dictionary
    #[serde(default = "default_short_lookup_max_length")]
    pub short_lookup_max_length: usize,

    /// Maximum number of lookups in flight at once
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Whether console output uses ANSI colors
    #[serde(default = "default_true")]
    pub color: bool,

    /// Selection source settings
    #[serde(default)]
    pub selection: SelectionConfig,

    /// HTTP client settings shared by all providers
    #[serde(default)]
    pub http: HttpConfig,

    /// Provider endpoints and composition
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How the selection is read and cleared
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SelectionConfig {
    /// Program and arguments printing the current selection on stdout
    #[serde(default = "default_read_command")]
    pub read_command: Vec<String>,

    /// Program and arguments clearing the current selection
    #[serde(default = "default_clear_command")]
    pub clear_command: Vec<String>,

    /// Trim every line of a multi-line selection before joining them
    #[serde(default = "default_true")]
    pub line_aware: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            read_command: default_read_command(),
            clear_command: default_clear_command(),
            line_aware: true,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base backoff in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Provider endpoints and how they are combined
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProvidersConfig {
    /// Machine translation endpoint
    #[serde(default = "default_translate_endpoint")]
    pub translate_endpoint: String,

    /// Dictionary page prefix, the looked-up word is appended
    #[serde(default = "default_dictionary_endpoint")]
    pub dictionary_endpoint: String,

    /// Look short selections up in the dictionary
    #[serde(default = "default_true")]
    pub dictionary_enabled: bool,

    /// Machine-translate short selections the dictionary does not know.
    /// On by default, so an unknown word shows its machine translation
    /// instead of "Translation not found" unless this is turned off.
    #[serde(default = "default_true")]
    pub fallback_to_translation: bool,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            translate_endpoint: default_translate_endpoint(),
            dictionary_endpoint: default_dictionary_endpoint(),
            dictionary_enabled: true,
            // unknown words show the machine translation, not "Translation not found"
            fallback_to_translation: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "zh-CN".to_string()
}

fn default_poll_interval_ms() -> u64 {
    300
}

fn default_max_selection_length() -> usize {
    255
}

fn default_short_lookup_max_length() -> usize {
    30
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_retry_count() -> u32 {
    1
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_read_command() -> Vec<String> {
    vec!["xsel".to_string(), "-o".to_string()]
}

fn default_clear_command() -> Vec<String> {
    vec!["xsel".to_string(), "-c".to_string()]
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) selectrans/0.1".to_string()
}

fn default_translate_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_dictionary_endpoint() -> String {
    "https://dict.youdao.com/w/".to_string()
}

impl Config {
    /// Poll interval as a duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.source_language)
            .context("Invalid source language")?;
        crate::language_utils::validate_language_code(&self.target_language)
            .context("Invalid target language")?;

        if self.poll_interval_ms == 0 {
            return Err(anyhow!("poll_interval_ms must be greater than zero"));
        }
        if self.short_lookup_max_length == 0 {
            return Err(anyhow!("short_lookup_max_length must be greater than zero"));
        }
        if self.max_selection_length < self.short_lookup_max_length {
            return Err(anyhow!(
                "max_selection_length ({}) must not be smaller than short_lookup_max_length ({})",
                self.max_selection_length,
                self.short_lookup_max_length
            ));
        }
        if self.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }
        if self.http.retry_count > MAX_RETRY_COUNT {
            return Err(anyhow!(
                "http.retry_count must be at most {}, got {}",
                MAX_RETRY_COUNT,
                self.http.retry_count
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(anyhow!("http.timeout_secs must be greater than zero"));
        }
        if self.selection.read_command.is_empty() || self.selection.read_command[0].trim().is_empty() {
            return Err(anyhow!("selection.read_command must name a program"));
        }
        if self.selection.clear_command.is_empty() || self.selection.clear_command[0].trim().is_empty() {
            return Err(anyhow!("selection.clear_command must name a program"));
        }

        validate_endpoint("providers.translate_endpoint", &self.providers.translate_endpoint)?;
        validate_endpoint("providers.dictionary_endpoint", &self.providers.dictionary_endpoint)?;

        Ok(())
    }

    /// Load the configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create config directory: {}", parent.display()))?;
            }
        }

        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Load the file at `path`, or write and return the defaults when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.save_to_file(path)?;
            Ok(config)
        }
    }

    /// Default location of the configuration file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("selectrans").join("conf.json"))
            .unwrap_or_else(|| PathBuf::from("conf.json"))
    }
}

fn validate_endpoint(name: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).context(format!("{} is not a valid URL: {}", name, endpoint))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(anyhow!("{} must use http or https, got {}", name, scheme)),
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            poll_interval_ms: default_poll_interval_ms(),
            max_selection_length: default_max_selection_length(),
            short_lookup_max_length: default_short_lookup_max_length(),
            concurrent_requests: default_concurrent_requests(),
            color: true,
            selection: SelectionConfig::default(),
            http: HttpConfig::default(),
            providers: ProvidersConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
