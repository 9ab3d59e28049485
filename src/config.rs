//! Configuration management for chatrelay.
//!
//! Loads configuration from ${CHATRELAY_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config template with comments, embedded at compile time.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

pub mod paths {
    //! Path resolution for chatrelay configuration.
    //!
    //! CHATRELAY_HOME resolution order:
    //! 1. CHATRELAY_HOME environment variable (if set)
    //! 2. ~/.config/chatrelay (default)

    use std::path::PathBuf;

    /// Returns the chatrelay home directory.
    ///
    /// Checks CHATRELAY_HOME env var first, falls back to ~/.config/chatrelay
    pub fn chatrelay_home() -> PathBuf {
        if let Ok(home) = std::env::var("CHATRELAY_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("chatrelay"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        chatrelay_home().join("config.toml")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion endpoint URL (CHATRELAY_ENDPOINT overrides this)
    pub endpoint_url: Option<String>,

    /// Optional inline system prompt
    pub system_prompt: Option<String>,

    /// Optional path to a file containing the system prompt
    pub system_prompt_file: Option<String>,

    /// Greeting printed when an interactive chat starts
    pub greeting: Option<String>,
}

impl Config {
    const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
    const DEFAULT_GREETING: &str = "Hello! How can I help you today?";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the completion endpoint URL.
    ///
    /// CHATRELAY_ENDPOINT wins over the config file; empty or whitespace
    /// values count as unset. A missing endpoint is a hard error, raised
    /// before any request is attempted.
    pub fn effective_endpoint(&self) -> Result<String> {
        if let Ok(url) = std::env::var("CHATRELAY_ENDPOINT")
            && !url.trim().is_empty()
        {
            return Ok(url.trim().to_string());
        }

        if let Some(url) = self.endpoint_url.as_deref()
            && !url.trim().is_empty()
        {
            return Ok(url.trim().to_string());
        }

        anyhow::bail!(
            "No completion endpoint configured. Set CHATRELAY_ENDPOINT or endpoint_url in {}",
            paths::config_path().display()
        )
    }

    /// Returns the effective system prompt, preferring the file if both are set.
    /// Falls back to the built-in persona when neither is set.
    pub fn effective_system_prompt(&self) -> Result<String> {
        if let Some(path_str) = &self.system_prompt_file {
            let content = fs::read_to_string(Path::new(path_str))
                .with_context(|| format!("Failed to read system prompt file: {}", path_str))?;
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }

        let trimmed = self.system_prompt.as_deref().unwrap_or("").trim();
        if trimmed.is_empty() {
            Ok(Self::DEFAULT_SYSTEM_PROMPT.to_string())
        } else {
            Ok(trimmed.to_string())
        }
    }

    /// Returns the greeting shown at chat start.
    /// Empty strings are treated as unset.
    pub fn effective_greeting(&self) -> &str {
        self.greeting
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(Self::DEFAULT_GREETING)
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, DEFAULT_CONFIG_TEMPLATE)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
