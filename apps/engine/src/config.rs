//! Engine configuration.
//!
//! Loaded once at process start from the environment (with `.env` support) and
//! passed explicitly into [`crate::analyzer::HybridAnalyzer`]. The engine never
//! reads ambient state after construction.

use std::env;

use url::Url;

use crate::error::EngineError;

/// Which LLM backend the adapter dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Local inference server speaking the `/api/generate` protocol.
    Ollama,
    /// Hosted chat-completions API with a bearer credential.
    OpenAi,
    /// No LLM backend; every request runs the statistical path.
    Disabled,
}

impl ProviderKind {
    pub fn parse(name: &str) -> Result<Self, EngineError> {
        match name.trim().to_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "openai" => Ok(ProviderKind::OpenAi),
            "none" => Ok(ProviderKind::Disabled),
            other => Err(EngineError::ProviderMisconfigured(format!(
                "unknown LLM provider '{other}' (expected 'ollama', 'openai' or 'none')"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Disabled => "none",
        }
    }
}

/// Immutable engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub provider: ProviderKind,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Upper bound on input text length, in characters.
    pub max_text_length: usize,
    pub default_summary_length: usize,
    pub default_keywords_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "qwen2.5:7b".to_string(),
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            max_text_length: 10_000,
            default_summary_length: 200,
            default_keywords_count: 10,
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment, falling back to defaults for
    /// anything unset. Reads `.env` if present.
    pub fn from_env() -> Result<Self, EngineError> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            provider: match env::var("LLM_PROVIDER") {
                Ok(name) => ProviderKind::parse(&name)?,
                Err(_) => defaults.provider,
            },
            ollama_base_url: env_or("OLLAMA_BASE_URL", defaults.ollama_base_url),
            ollama_model: env_or("OLLAMA_MODEL", defaults.ollama_model),
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_base_url: env_or("OPENAI_BASE_URL", defaults.openai_base_url),
            openai_model: env_or("OPENAI_MODEL", defaults.openai_model),
            max_text_length: env_usize("MAX_TEXT_LENGTH", defaults.max_text_length)?,
            default_summary_length: env_usize(
                "DEFAULT_SUMMARY_LENGTH",
                defaults.default_summary_length,
            )?,
            default_keywords_count: env_usize(
                "DEFAULT_KEYWORDS_COUNT",
                defaults.default_keywords_count,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn llm_enabled(&self) -> bool {
        self.provider != ProviderKind::Disabled
    }

    fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("OLLAMA_BASE_URL", &self.ollama_base_url),
            ("OPENAI_BASE_URL", &self.openai_base_url),
        ] {
            Url::parse(value).map_err(|e| {
                EngineError::ProviderMisconfigured(format!("{name} '{value}' is not a valid URL: {e}"))
            })?;
        }

        if self.max_text_length == 0 {
            return Err(EngineError::ProviderMisconfigured(
                "MAX_TEXT_LENGTH must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_or(name: &str, default: String) -> String {
    env::var(name).ok().filter(|v| !v.is_empty()).unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> Result<usize, EngineError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| {
            EngineError::ProviderMisconfigured(format!("{name} '{value}' is not a valid integer"))
        }),
        Err(_) => Ok(default),
    }
}
