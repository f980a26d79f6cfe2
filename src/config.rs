//! Configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::clarify::ClarificationPolicy;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation service configuration
    pub llm: LlmConfig,

    /// Default clarification policy applied when a request omits one
    pub clarification: ClarificationConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call early in startup to fail fast with a clear message instead of a
    /// mid-request auth error.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    ///
    /// Explicit path → `.lfdraft.yml` in CWD → `~/.config/lfdraft/lfdraft.yml`
    /// → defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".lfdraft.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("lfdraft").join("lfdraft.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Peek at the configured log level before logging is initialized
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "openai" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4.1-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 4096,
            timeout_ms: 120_000,
        }
    }
}

/// Defaults for the clarification policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarificationConfig {
    /// Cap on surfaced questions
    #[serde(rename = "max-questions")]
    pub max_questions: usize,

    /// Whether to proceed when only optional questions remain
    #[serde(rename = "allow-proceed-with-assumptions")]
    pub allow_proceed_with_assumptions: bool,
}

impl Default for ClarificationConfig {
    fn default() -> Self {
        let policy = ClarificationPolicy::default();
        Self {
            max_questions: policy.max_questions,
            allow_proceed_with_assumptions: policy.allow_proceed_with_assumptions,
        }
    }
}

impl ClarificationConfig {
    /// The policy applied when a request does not supply one
    pub fn default_policy(&self) -> ClarificationPolicy {
        ClarificationPolicy {
            max_questions: self.max_questions,
            allow_proceed_with_assumptions: self.allow_proceed_with_assumptions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.clarification.max_questions, 3);
        assert!(config.clarification.allow_proceed_with_assumptions);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  provider: openai
  model: gpt-4.1
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  max-tokens: 8192
  timeout-ms: 60000

clarification:
  max-questions: 5
  allow-proceed-with-assumptions: false

log-level: DEBUG
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gpt-4.1");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.max_tokens, 8192);
        assert_eq!(config.clarification.max_questions, 5);
        assert!(!config.clarification.allow_proceed_with_assumptions);
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gpt-4o-mini
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.clarification.max_questions, 3);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lfdraft.yml");
        std::fs::write(&path, "llm:\n  model: custom-model\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.llm.model, "custom-model");
    }

    #[test]
    fn test_load_explicit_path_missing_is_error() {
        let path = PathBuf::from("/nonexistent/lfdraft.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_default_policy_from_config() {
        let config = ClarificationConfig {
            max_questions: 2,
            allow_proceed_with_assumptions: false,
        };
        let policy = config.default_policy();
        assert_eq!(policy.max_questions, 2);
        assert!(!policy.allow_proceed_with_assumptions);
    }
}
