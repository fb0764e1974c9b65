//! Configuration handling for the application.
//!
//! Everything is read from environment variables once at startup by
//! [`Config::from_env`], with development defaults for anything optional. The
//! resulting value is passed explicitly to whatever needs it.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

/// Environment variable names.
pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_MODEL: &str = "ZEROWASH_MODEL";
pub const ENV_COMPLETION_BASE_URL: &str = "ZEROWASH_COMPLETION_BASE_URL";
pub const ENV_PROMPT_PATH: &str = "ZEROWASH_PROMPT_PATH";
pub const ENV_RATE_LIMIT_MAX: &str = "ZEROWASH_RATE_LIMIT_MAX";
pub const ENV_RATE_LIMIT_WINDOW_SECS: &str = "ZEROWASH_RATE_LIMIT_WINDOW_SECS";
pub const ENV_LOG_JSON: &str = "ZEROWASH_LOG_JSON";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_COMPLETION_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_RATE_LIMIT_MAX: u32 = 10;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: i64 = 60;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    api_key: Option<String>,
    model: String,
    completion_base_url: String,
    prompt_path: Option<PathBuf>,
    rate_limit_max: u32,
    rate_limit_window_secs: i64,
    log_json: bool,
}

impl Config {
    /// Create a config explicitly; everything not named gets its default.
    pub fn new(bind_addr: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            completion_base_url: DEFAULT_COMPLETION_BASE_URL.to_string(),
            prompt_path: None,
            rate_limit_max: DEFAULT_RATE_LIMIT_MAX,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            log_json: false,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    ///
    /// A missing API key is not an error here: auditing is disabled and the
    /// UI says so. Malformed numeric values are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(
            env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            env::var(ENV_API_KEY).ok(),
        );

        if let Ok(model) = env::var(ENV_MODEL) {
            config.model = model;
        }
        if let Ok(base_url) = env::var(ENV_COMPLETION_BASE_URL) {
            config.completion_base_url = base_url;
        }
        config.prompt_path = env::var_os(ENV_PROMPT_PATH).map(PathBuf::from);
        config.rate_limit_max = parse_var(ENV_RATE_LIMIT_MAX, DEFAULT_RATE_LIMIT_MAX)?;
        config.rate_limit_window_secs =
            parse_var(ENV_RATE_LIMIT_WINDOW_SECS, DEFAULT_RATE_LIMIT_WINDOW_SECS)?;
        config.log_json = env::var(ENV_LOG_JSON)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        if config.rate_limit_window_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_RATE_LIMIT_WINDOW_SECS,
                reason: "must be positive".to_string(),
            });
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_completion_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.completion_base_url = base_url.into();
        self
    }

    pub fn with_prompt_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.prompt_path = Some(path.into());
        self
    }

    pub fn with_rate_limit(mut self, max_requests: u32, window_secs: i64) -> Self {
        self.rate_limit_max = max_requests;
        self.rate_limit_window_secs = window_secs;
        self
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Credential for the completion service, if configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
    pub fn model(&self) -> &str {
        &self.model
    }
    pub fn completion_base_url(&self) -> &str {
        &self.completion_base_url
    }
    /// Replacement audit prompt; the bundled rubric is used when unset.
    pub fn prompt_path(&self) -> Option<&Path> {
        self.prompt_path.as_deref()
    }
    pub fn rate_limit_max(&self) -> u32 {
        self.rate_limit_max
    }
    pub fn rate_limit_window_secs(&self) -> i64 {
        self.rate_limit_window_secs
    }
    pub fn log_json(&self) -> bool {
        self.log_json
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field: name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("cannot read prompt template {path}: {source}")]
    PromptTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_API_KEY,
            ENV_BIND_ADDR,
            ENV_MODEL,
            ENV_COMPLETION_BASE_URL,
            ENV_PROMPT_PATH,
            ENV_RATE_LIMIT_MAX,
            ENV_RATE_LIMIT_WINDOW_SECS,
            ENV_LOG_JSON,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.model(), "gemini-2.5-flash");
        assert_eq!(cfg.completion_base_url(), DEFAULT_COMPLETION_BASE_URL);
        assert_eq!(cfg.prompt_path(), None);
        assert_eq!(cfg.rate_limit_max(), 10);
        assert_eq!(cfg.rate_limit_window_secs(), 60);
        assert!(!cfg.log_json());
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_API_KEY, "test-key");
            env::set_var(ENV_BIND_ADDR, "0.0.0.0:9000");
            env::set_var(ENV_MODEL, "gemini-2.5-pro");
            env::set_var(ENV_PROMPT_PATH, "/etc/zerowash/prompt.md");
            env::set_var(ENV_RATE_LIMIT_MAX, "3");
            env::set_var(ENV_LOG_JSON, "1");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.api_key(), Some("test-key"));
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.model(), "gemini-2.5-pro");
        assert_eq!(cfg.prompt_path(), Some(Path::new("/etc/zerowash/prompt.md")));
        assert_eq!(cfg.rate_limit_max(), 3);
        assert!(cfg.log_json());
        clear_env();
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_API_KEY, "   ");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.api_key(), None);
        clear_env();
    }

    #[test]
    fn rejects_malformed_numbers() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_RATE_LIMIT_MAX, "lots");
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field, .. } if field == ENV_RATE_LIMIT_MAX
        ));

        unsafe {
            env::remove_var(ENV_RATE_LIMIT_MAX);
            env::set_var(ENV_RATE_LIMIT_WINDOW_SECS, "0");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }
}
