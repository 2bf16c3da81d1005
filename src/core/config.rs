//! Configuration management for OR-AF
//!
//! Supports environment variables, a config file, and runtime overrides.
//! The agent roster is part of the config, so a deployment can change which
//! agents get registered without recompiling.
//!
//! Config file location: ~/.config/or-af/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::agent::orchestrator::DEFAULT_NAME;
use crate::agent::Orchestrator;
use crate::agents::registry::default_roster;
use crate::agents::AgentSpec;
use crate::core::error::{OrafError, Result};

/// Main configuration for OR-AF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Orchestrator settings
    #[serde(default)]
    pub framework: FrameworkConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Agents registered at startup, in order
    #[serde(default = "default_roster")]
    pub agents: Vec<AgentSpec>,
}

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    /// Orchestrator name (default: OR-AF)
    pub name: String,
    /// Whether to show debug output
    pub debug: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset (default: info)
    pub level: String,
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            name: env::var("OR_AF_NAME").unwrap_or_else(|_| DEFAULT_NAME.to_string()),
            debug: env_flag("OR_AF_DEBUG"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: env::var("OR_AF_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            framework: FrameworkConfig::default(),
            logging: LoggingConfig::default(),
            agents: default_roster(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("or-af")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > config file > env vars > defaults
    ///
    /// A config file that exists but cannot be read or parsed is reported
    /// with a warning and the defaults are used.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();

        let (config, problem) = Self::load_or_default(&Self::config_file());
        if let Some(err) = problem {
            warn!(error = %err, "ignoring config file, using defaults");
        }
        config
    }

    /// Load `path` if it exists, falling back to the defaults.
    ///
    /// A missing file is not a problem. Any other failure is returned next to
    /// the defaults so the caller decides how loudly to report it.
    pub fn load_or_default(path: &Path) -> (Self, Option<OrafError>) {
        if !path.exists() {
            return (Self::default(), None);
        }

        match Self::load_from_path(path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OrafError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| OrafError::config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| OrafError::config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to the default location and return the path
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file();
        self.save_to_path(&path)?;
        Ok(path)
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| {
                    OrafError::config(format!("Failed to create config dir: {}", e))
                })?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| OrafError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| OrafError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Build an orchestrator with every configured agent registered in order
    pub fn build_orchestrator(&self) -> Orchestrator {
        let mut orchestrator = Orchestrator::new(&self.framework.name);
        for spec in &self.agents {
            orchestrator.register_agent(spec.build());
        }
        orchestrator
    }

    /// Set the orchestrator name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.framework.name = name.into();
    }

    /// Enable or disable debug output
    pub fn set_debug(&mut self, debug: bool) {
        self.framework.debug = debug;
    }

    /// Filter directive for the log subscriber
    pub fn log_filter(&self) -> &str {
        if self.framework.debug {
            "debug"
        } else {
            &self.logging.level
        }
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }
}
