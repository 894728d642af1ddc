//! cmdshell configuration
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. User-level (~/.config/cmdshell/config.toml)
//! 3. Default values
//! ```
//!
//! # Usage
//!
//! ```rust
//! use cmdshell::util::config::load_user_config;
//!
//! // Missing config file yields defaults
//! let config = load_user_config().unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::filter::{IgnoredCommandSet, ReservedWordSet};

/// Directory name used under the config and cache roots
pub const APP_DIR: &str = "cmdshell";

/// User-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Cache root; history files live in its `cli` subdirectory
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Prefix of site-scoped history files
    #[serde(default = "default_tool_name")]
    pub tool_name: String,
    /// REPL settings
    #[serde(default)]
    pub repl: ReplConfig,
    /// Host settings
    #[serde(default)]
    pub host: HostConfig,
    /// Command filter settings
    #[serde(default)]
    pub commands: CommandsConfig,
}

fn default_tool_name() -> String {
    APP_DIR.to_string()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            tool_name: default_tool_name(),
            repl: ReplConfig::default(),
            host: HostConfig::default(),
            commands: CommandsConfig::default(),
        }
    }
}

/// REPL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    /// History size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// Prompt string
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Use vi key bindings
    #[serde(default)]
    pub vi_mode: bool,
    /// Colored help output
    #[serde(default = "default_colors")]
    pub colors: bool,
}

fn default_history_size() -> usize {
    1000
}

fn default_prompt() -> String {
    "cmd> ".to_string()
}

fn default_colors() -> bool {
    true
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            history_size: 1000,
            prompt: "cmd> ".to_string(),
            vi_mode: false,
            colors: true,
        }
    }
}

/// Host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Host manifest file
    #[serde(default)]
    pub manifest: Option<PathBuf>,
    /// Site alias file
    #[serde(default)]
    pub aliases: Option<PathBuf>,
    /// File whose presence marks a site root
    #[serde(default = "default_root_marker")]
    pub root_marker: String,
}

fn default_root_marker() -> String {
    "site.toml".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            aliases: None,
            root_marker: default_root_marker(),
        }
    }
}

/// Command filter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// Extra command names never exposed
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Extra reserved words
    #[serde(default)]
    pub reserve: Vec<String>,
}

impl CommandsConfig {
    /// Default ignored set plus configured names
    pub fn ignored(&self) -> IgnoredCommandSet {
        IgnoredCommandSet::defaults().with_extra(self.ignore.iter().cloned())
    }

    /// Shell keywords plus configured words
    pub fn reserved(&self) -> ReservedWordSet {
        ReservedWordSet::shell_keywords().with_extra(self.reserve.iter().cloned())
    }
}

impl UserConfig {
    /// Cache root: configured, else the platform default, else the temp dir
    pub fn cache_root(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .or_else(get_cache_dir)
            .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR))
    }

    /// Directory holding history files
    pub fn history_dir(&self) -> PathBuf {
        self.cache_root().join("cli")
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    config_dir_from(|key| std::env::var(key).ok())
}

fn config_dir_from(env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Some(xdg_config) = env("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join(APP_DIR));
    }

    // Fallback to ~/.config/cmdshell
    if let Some(home) = env("HOME") {
        return Some(PathBuf::from(home).join(".config").join(APP_DIR));
    }

    // On Windows, try %APPDATA%
    if let Some(appdata) = env("APPDATA") {
        return Some(PathBuf::from(appdata).join(APP_DIR));
    }

    None
}

/// Get the user cache directory
pub fn get_cache_dir() -> Option<PathBuf> {
    cache_dir_from(|key| std::env::var(key).ok())
}

fn cache_dir_from(env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(xdg_cache) = env("XDG_CACHE_HOME") {
        return Some(PathBuf::from(xdg_cache).join(APP_DIR));
    }

    if let Some(home) = env("HOME") {
        return Some(PathBuf::from(home).join(".cache").join(APP_DIR));
    }

    if let Some(local) = env("LOCALAPPDATA") {
        return Some(PathBuf::from(local).join(APP_DIR).join("cache"));
    }

    None
}

/// Get the user config file path (~/.config/cmdshell/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Load user-level configuration
/// Returns default config if file doesn't exist
pub fn load_user_config() -> Result<UserConfig, ConfigError> {
    let path = match get_config_path() {
        Some(p) => p,
        None => return Ok(UserConfig::default()),
    };

    if !path.exists() {
        return Ok(UserConfig::default());
    }

    load_config_file(&path)
}

/// Load configuration from an explicit file, which must exist
pub fn load_config_file(path: &Path) -> Result<UserConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
