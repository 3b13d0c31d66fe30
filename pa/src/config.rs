//! Configuration loading and defaults
//!
//! Configuration is read from a YAML file; every field has a default so a
//! missing or partial file still yields a usable config. Resolution order:
//! explicit `--config` path, then the platform config dir, then the
//! working directory.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::llm::LlmError;

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name, currently only "gemini"
    pub provider: String,
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub timeout_ms: u64,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_ms: 60_000,
            max_tokens: 4096,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, LlmError> {
        std::env::var(&self.api_key_env)
            .map_err(|_| LlmError::MissingApiKey(self.api_key_env.clone()))
    }
}

/// GitHub search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Disable to skip similar-project lookups entirely
    pub enabled: bool,
    /// Repositories fetched per roadmap query
    pub max_results: usize,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_results: 3,
        }
    }
}

/// Top-level agent configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub github: GithubConfig,
    /// Project store root; defaults to the platform data dir
    pub store_path: Option<PathBuf>,
    /// Log level override (error, warn, info, debug, trace)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration, probing standard locations when no explicit
    /// path is given
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        debug!("load: called");

        if let Some(path) = path {
            debug!(path = %path.display(), "load: explicit config path");
            let contents = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
            return serde_yaml::from_str(&contents)
                .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()));
        }

        for candidate in Self::default_paths() {
            if candidate.exists() {
                debug!(path = %candidate.display(), "load: found config");
                let contents = std::fs::read_to_string(&candidate)
                    .wrap_err_with(|| format!("Failed to read config file: {}", candidate.display()))?;
                return serde_yaml::from_str(&contents)
                    .wrap_err_with(|| format!("Failed to parse config file: {}", candidate.display()));
            }
        }

        debug!("load: no config file found, using defaults");
        Ok(Self::default())
    }

    /// Standard config locations, most specific first
    fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("projectagent").join("config.yml"));
        }
        paths.push(PathBuf::from("projectagent.yml"));
        paths
    }

    /// Resolved store root
    pub fn store_path(&self) -> PathBuf {
        match &self.store_path {
            Some(path) => path.clone(),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("projectstore"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert!(config.github.enabled);
        assert_eq!(config.github.max_results, 3);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("llm:\n  model: gemini-2.0-pro\n").unwrap();
        assert_eq!(config.llm.model, "gemini-2.0-pro");
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.timeout_ms, 60_000);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "github:\n  enabled: false\nlog_level: debug\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.github.enabled);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "llm: [not a map").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_api_key_env() {
        let llm = LlmConfig {
            api_key_env: "PA_TEST_KEY_THAT_DOES_NOT_EXIST".to_string(),
            ..Default::default()
        };
        assert!(matches!(llm.api_key(), Err(LlmError::MissingApiKey(_))));
    }

    #[test]
    fn test_store_path_override() {
        let config = Config {
            store_path: Some(PathBuf::from("/tmp/store")),
            ..Default::default()
        };
        assert_eq!(config.store_path(), PathBuf::from("/tmp/store"));
    }
}
