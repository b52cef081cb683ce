//! # LLM Provider Adapter
//!
//! Uniform interface over interchangeable remote backends. Each invocation
//! builds a task-specific prompt, issues one bounded outbound call, and
//! decodes the free-form reply into structured data on a best-effort basis.
//!
//! ## Components
//! - `provider`: the [`LlmProvider`] capability trait and health types
//! - `prompt`: per-kind instruction prompts
//! - `extract`: balanced-brace structured-output extraction
//! - `ollama`: local inference backend (`/api/generate`)
//! - `openai`: hosted chat-completions backend (bearer credential)

pub mod extract;
pub mod ollama;
pub mod openai;
pub mod prompt;
pub mod provider;

pub use extract::{decode_reply, extract_structured};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use provider::{HealthStatus, LlmProvider, ProviderHealth, ProviderTask};

use crate::config::{EngineConfig, ProviderKind};
use crate::error::EngineError;

/// Configuration-driven provider factory. `Disabled` yields no provider;
/// misconfiguration (e.g. a missing credential) fails construction.
pub fn build_provider(
    config: &EngineConfig,
) -> Result<Option<Box<dyn LlmProvider>>, EngineError> {
    match config.provider {
        ProviderKind::Disabled => Ok(None),
        ProviderKind::Ollama => Ok(Some(Box::new(OllamaProvider::new(
            &config.ollama_base_url,
            &config.ollama_model,
        )))),
        ProviderKind::OpenAi => Ok(Some(Box::new(OpenAiProvider::new(
            &config.openai_base_url,
            &config.openai_model,
            config.openai_api_key.clone(),
        )?))),
    }
}
