//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/repolens/) and project (.repolens/) level
//! configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{network, retrieval};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Repository retrieval settings
    pub retrieval: RetrievalConfig,

    /// LLM enrichment settings
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            server: ServerConfig::default(),
            retrieval: RetrievalConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `RepoLensError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(crate::types::RepoLensError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(crate::types::RepoLensError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.clone_timeout_secs == 0 {
            return Err(crate::types::RepoLensError::Config(
                "Retrieval clone_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.server.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(crate::types::RepoLensError::Config(format!(
                "Invalid server bind address: {}",
                self.server.bind_addr
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    pub bind_addr: String,

    /// Allow any origin (the service fronts a public web UI)
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: network::DEFAULT_BIND_ADDR.to_string(),
            permissive_cors: true,
        }
    }
}

// =============================================================================
// Retrieval Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Git binary to invoke for shallow clones
    pub git_binary: String,

    /// Clone timeout in seconds
    pub clone_timeout_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            git_binary: "git".to_string(),
            clone_timeout_secs: retrieval::CLONE_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Whether LLM enrichment runs at all. When false (the default),
    /// enrichment is purely rule-based.
    pub enabled: bool,

    /// Provider name (currently "openai" or any OpenAI-compatible API)
    pub provider: String,

    /// Model name
    pub model: String,

    /// API base URL override (OpenAI-compatible endpoints)
    pub api_base: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Temperature for LLM generation
    pub temperature: f32,

    /// Maximum tokens per completion
    pub max_tokens: usize,

    /// Fallback provider for the cascade chain
    pub fallback_provider: Option<String>,

    /// Fallback model for the cascade chain
    pub fallback_model: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_base: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.7,
            max_tokens: 1000,
            fallback_provider: None,
            fallback_model: None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.provider, "openai");
        assert!(!config.llm.enabled);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        let mut config = Config::default();
        config.llm.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_bind_addr() {
        let mut config = Config::default();
        config.server.bind_addr = "not-an-addr".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.retrieval.clone_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
