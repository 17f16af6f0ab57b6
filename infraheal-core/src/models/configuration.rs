//! Configuration data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub enum LogLevel {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "info")]
    #[default]
    Info,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "trace")]
    Trace,
}

/// Resource types whose deletion is vetoed by default
pub const DEFAULT_PROTECTED_TYPES: &[&str] = &["aws_db_instance", "aws_s3_bucket"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    /// Directory the provisioning tool runs in (state, modules, plan artifact)
    pub workspace_dir: PathBuf,
    /// Workspace selected before planning
    pub workspace_name: String,
    /// Provisioning tool binary name or path (e.g. "terraform", "tofu")
    pub terraform_bin: String,
    /// Resource types whose deletion is vetoed by the plan policy
    pub protected_resource_types: Vec<String>,
    /// Per-invocation timeout in seconds (None = wait indefinitely)
    pub command_timeout_seconds: Option<u64>,
    /// Logging verbosity level
    pub log_level: LogLevel,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            workspace_dir: PathBuf::from("."),
            workspace_name: "default".to_string(),
            terraform_bin: "terraform".to_string(),
            protected_resource_types: DEFAULT_PROTECTED_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            command_timeout_seconds: None,
            log_level: LogLevel::Info,
        }
    }
}

impl Configuration {
    /// Load configuration from file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Configuration = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Return default configuration if file doesn't exist
            Ok(Configuration::default())
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn default_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_dir = dirs::config_dir().ok_or("Could not determine config directory")?;
        Ok(config_dir.join("infraheal").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.workspace_name.is_empty() {
            errors.push("workspace_name cannot be empty".to_string());
        }

        if self.terraform_bin.is_empty() {
            errors.push("terraform_bin cannot be empty".to_string());
        }

        if let Some(timeout) = self.command_timeout_seconds {
            if timeout == 0 {
                errors.push("command_timeout_seconds must be at least 1 when set".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
