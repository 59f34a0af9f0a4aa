use crate::domain::error::FolpError;
use crate::infrastructure::storage::cache::{
    DEFAULT_CHECK_PERIOD, DEFAULT_MAX_ENTRIES, DEFAULT_TTL,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub credentials: Credentials,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_check_period_secs")]
    pub check_period_secs: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,
    #[serde(default = "default_wiki_url")]
    pub wiki_url: String,
    #[serde(default = "default_translate_url")]
    pub translate_url: String,
    #[serde(default = "default_stackexchange_url")]
    pub stackexchange_url: String,
    #[serde(default = "default_wolfram_api_url")]
    pub wolfram_api_url: String,
    #[serde(default = "default_wolfram_www_url")]
    pub wolfram_www_url: String,
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
    #[serde(default = "default_translate_timeout_ms")]
    pub translate_timeout_ms: u64,
    #[serde(default = "default_code_timeout_ms")]
    pub code_timeout_ms: u64,
    #[serde(default = "default_wolfram_timeout_ms")]
    pub wolfram_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Credentials {
    pub wolfram_appid: Option<String>,
    pub wolfram_key: Option<String>,
    /// Read and reported at startup; no route sends it anywhere.
    pub stack_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cache: CacheConfig::default(),
            logging: Logging::default(),
            upstream: UpstreamConfig::default(),
            credentials: Credentials::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            check_period_secs: default_check_period_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            dictionary_url: default_dictionary_url(),
            wiki_url: default_wiki_url(),
            translate_url: default_translate_url(),
            stackexchange_url: default_stackexchange_url(),
            wolfram_api_url: default_wolfram_api_url(),
            wolfram_www_url: default_wolfram_www_url(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            translate_timeout_ms: default_translate_timeout_ms(),
            code_timeout_ms: default_code_timeout_ms(),
            wolfram_timeout_ms: default_wolfram_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn check_period(&self) -> Duration {
        // tokio intervals panic on a zero period
        Duration::from_secs(self.check_period_secs.max(1))
    }
}

impl Logging {
    /// `EnvFilter` directive for the configured level; unknown levels mean `info`
    pub fn filter_directive(&self) -> &'static str {
        match self.level.to_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "INFO" => "info",
            "WARN" => "warn",
            "ERROR" => "error",
            _ => "info",
        }
    }
}

impl UpstreamConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    pub fn translate_timeout(&self) -> Duration {
        Duration::from_millis(self.translate_timeout_ms)
    }

    pub fn code_timeout(&self) -> Duration {
        Duration::from_millis(self.code_timeout_ms)
    }

    pub fn wolfram_timeout(&self) -> Duration {
        Duration::from_millis(self.wolfram_timeout_ms)
    }
}

impl Config {
    pub fn bind_addr(&self) -> Result<SocketAddr, FolpError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| FolpError::Config(format!("Invalid bind address: {}", e)))
    }

    /// Apply `PORT`, `WOLFRAM_APPID`, `WOLFRAM_KEY` and `STACK_KEY` from `lookup`.
    ///
    /// Empty variables are ignored. An unparsable `PORT` keeps the configured
    /// port and is reported as a warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(port) = var("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.port = port,
                Err(e) => tracing::warn!(value = %port, error = %e, "ignoring invalid PORT"),
            }
        }
        if let Some(appid) = var("WOLFRAM_APPID") {
            self.credentials.wolfram_appid = Some(appid);
        }
        if let Some(key) = var("WOLFRAM_KEY") {
            self.credentials.wolfram_key = Some(key);
        }
        if let Some(key) = var("STACK_KEY") {
            self.credentials.stack_key = Some(key);
        }
    }

    /// Copy of the config that is safe to print
    pub fn masked(&self) -> Config {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "********".to_string());
        let mut masked = self.clone();
        masked.credentials = Credentials {
            wolfram_appid: mask(&self.credentials.wolfram_appid),
            wolfram_key: mask(&self.credentials.wolfram_key),
            stack_key: mask(&self.credentials.stack_key),
        };
        masked
    }
}

// Defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}
fn default_check_period_secs() -> u64 {
    DEFAULT_CHECK_PERIOD.as_secs()
}
fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "INFO".to_string()
}
fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev".to_string()
}
fn default_wiki_url() -> String {
    "https://en.wikipedia.org".to_string()
}
fn default_translate_url() -> String {
    "https://api.mymemory.translated.net".to_string()
}
fn default_stackexchange_url() -> String {
    "https://api.stackexchange.com".to_string()
}
fn default_wolfram_api_url() -> String {
    "https://api.wolframalpha.com".to_string()
}
fn default_wolfram_www_url() -> String {
    "https://www.wolframalpha.com".to_string()
}
fn default_lookup_timeout_ms() -> u64 {
    3000
}
fn default_translate_timeout_ms() -> u64 {
    3500
}
fn default_code_timeout_ms() -> u64 {
    4000
}
fn default_wolfram_timeout_ms() -> u64 {
    4000
}
fn default_user_agent() -> String {
    concat!("folp/", env!("CARGO_PKG_VERSION")).to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("folp").join("config.toml"))
}

/// Load the config file at `path`, or the default location when `None`.
///
/// A missing file yields defaults; a file that fails to parse is reported and
/// also yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, FolpError> {
    let config_path = path.map(Path::to_path_buf).or_else(get_config_path);

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match toml::from_str::<Config>(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample(path: Option<&Path>) -> Result<PathBuf, FolpError> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(get_config_path)
        .ok_or_else(|| FolpError::Config("Cannot determine config directory".to_string()))?;

    if path.exists() {
        return Err(FolpError::Config(format!(
            "Config file already exists at: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let toml_content = toml::to_string_pretty(&Config::default())
        .map_err(|e| FolpError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(&path, toml_content)
        .map_err(|e| FolpError::Config(format!("Failed to write config file: {}", e)))?;

    Ok(path)
}
