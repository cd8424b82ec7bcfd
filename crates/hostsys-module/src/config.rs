//! Facade configuration, loaded from YAML.

use anyhow::{anyhow, Context, Result};
use hostsys_process::{CapacityPolicy, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY};
use serde::Deserialize;
use std::path::Path;

/// Top-level facade configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FacadeConfig {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Working directory query buffer limits
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Upper bound for buffer growth
    #[serde(default = "default_max_capacity")]
    pub max_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_initial_capacity() -> usize {
    DEFAULT_INITIAL_CAPACITY
}

fn default_max_capacity() -> usize {
    DEFAULT_MAX_CAPACITY
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            max_capacity: default_max_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl DirectoryConfig {
    pub fn capacity_policy(&self) -> CapacityPolicy {
        CapacityPolicy {
            initial: self.initial_capacity,
            max: self.max_capacity,
        }
    }
}

impl FacadeConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        Self::load_from_string(&content)
    }

    /// Load configuration from a YAML string
    pub fn load_from_string(content: &str) -> Result<Self> {
        let config: FacadeConfig = serde_yaml::from_str(content)
            .context("Failed to parse YAML configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.directory.initial_capacity == 0 {
            return Err(anyhow!("Directory initial capacity must be greater than 0"));
        }

        if self.directory.max_capacity < self.directory.initial_capacity {
            return Err(anyhow!(
                "Directory max capacity ({}) must not be below initial capacity ({})",
                self.directory.max_capacity,
                self.directory.initial_capacity
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(anyhow!(
                "Invalid log level: {}, must be one of: trace, debug, info, warn, error",
                self.logging.level
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FacadeConfig::default();
        assert_eq!(config.directory.initial_capacity, 4096);
        assert_eq!(config.directory.max_capacity, 1024 * 1024);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = FacadeConfig::load_from_string("{}").unwrap();
        assert_eq!(config, FacadeConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let yaml = r#"
directory:
  initial_capacity: 256
logging:
  level: debug
"#;
        let config = FacadeConfig::load_from_string(yaml).unwrap();
        assert_eq!(config.directory.initial_capacity, 256);
        assert_eq!(config.directory.max_capacity, DEFAULT_MAX_CAPACITY);
        assert_eq!(config.logging.level, "debug");

        let policy = config.directory.capacity_policy();
        assert_eq!(policy.initial, 256);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = FacadeConfig::load_from_string("directory:\n  initial_capacity: 0\n").unwrap_err();
        assert!(err.to_string().contains("initial capacity"));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let yaml = "directory:\n  initial_capacity: 1024\n  max_capacity: 512\n";
        assert!(FacadeConfig::load_from_string(yaml).is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = FacadeConfig::load_from_string("logging:\n  level: loud\n").unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "directory:\n  max_capacity: 8192").unwrap();

        let config = FacadeConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.directory.max_capacity, 8192);
    }

    #[test]
    fn test_missing_file() {
        let err = FacadeConfig::load_from_file("/nonexistent/hostsys.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
