//! The config module provides the fetcher configuration and its parsing logic.
//!
//! Settings are passed explicitly to the fetcher rather than kept in process-wide state. They can
//! be built in code or read from a TOML file, in which case invalid values are reported with the
//! offending key and unrecognized keys are warned about.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::warn;

use crate::error::{ExpectedError, Result};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows; U; Windows NT 5.1; en-US; rv:1.9.0.7) Gecko/2009021910 Firefox/3.0.7";
pub const DEFAULT_BASE_URL: &str = "https://lyrics.fandom.com";

const KNOWN_KEYS: &[&str] = &["user_agent", "verbose", "sleep", "base_url"];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// User agent sent with every request.
    pub user_agent: String,
    /// Log every successful fetch at info level.
    pub verbose: bool,
    /// Delay applied before every request.
    pub sleep: Duration,
    /// Scheme and host of the wiki, without a trailing slash.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            verbose: false,
            sleep: Duration::ZERO,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    user_agent: Option<String>,
    verbose: Option<bool>,
    sleep: Option<f64>,
    base_url: Option<String>,
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lyricwiki").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    /// Reads the configuration from `config_path_override`, or from the default location.
    pub fn parse(config_path_override: Option<&Path>) -> Result<Self> {
        let cfgpath = match config_path_override {
            Some(path) => path.to_path_buf(),
            None => default_config_path()
                .ok_or_else(|| ExpectedError::Generic("Failed to locate the configuration directory".to_string()))?,
        };
        let text = std::fs::read_to_string(&cfgpath)
            .map_err(|_| ExpectedError::ConfigNotFound { path: cfgpath.clone() })?;
        Self::parse_str(&text, &cfgpath)
    }

    pub fn parse_str(text: &str, cfgpath: &Path) -> Result<Self> {
        let table: toml::Table = toml::from_str(text).map_err(|e| ExpectedError::ConfigDecode {
            path: cfgpath.to_path_buf(),
            message: e.to_string(),
        })?;
        for key in table.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            warn!("Unrecognized key {key} in configuration file ({})", cfgpath.display());
        }

        let raw: RawConfig = toml::from_str(text).map_err(|e| ExpectedError::ConfigDecode {
            path: cfgpath.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config = Config::default();
        if let Some(user_agent) = raw.user_agent {
            if user_agent.trim().is_empty() {
                return Err(invalid("user_agent", "must be a non-empty string"));
            }
            config.user_agent = user_agent;
        }
        if let Some(verbose) = raw.verbose {
            config.verbose = verbose;
        }
        if let Some(sleep) = raw.sleep {
            if !sleep.is_finite() || sleep < 0.0 {
                return Err(invalid("sleep", &format!("must be a non-negative number of seconds: got {sleep}")));
            }
            config.sleep = Duration::from_secs_f64(sleep);
        }
        if let Some(base_url) = raw.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(invalid("base_url", &format!("must be an http(s) URL: got {base_url}")));
            }
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    /// An empty user agent keeps the current one.
    pub fn with_user_agent(mut self, user_agent: Option<&str>) -> Self {
        if let Some(ua) = user_agent.filter(|ua| !ua.trim().is_empty()) {
            self.user_agent = ua.to_string();
        }
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_sleep(mut self, sleep: Duration) -> Self {
        self.sleep = sleep;
        self
    }
}

fn invalid(key: &str, message: &str) -> crate::error::LyricWikiError {
    ExpectedError::InvalidConfigValue { key: key.to_string(), message: message.to_string() }.into()
}
