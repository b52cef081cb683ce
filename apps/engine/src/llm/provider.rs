use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::EngineError;
use crate::models::AnalysisKind;

/// Parameters for one LLM analysis call.
#[derive(Debug, Clone)]
pub struct ProviderTask {
    pub kind: AnalysisKind,
    pub text: String,
    /// Second text for similarity tasks.
    pub second_text: Option<String>,
    pub top_k: usize,
    pub max_length: usize,
}

impl ProviderTask {
    pub fn new(kind: AnalysisKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            second_text: None,
            top_k: 10,
            max_length: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Unknown,
    Error,
}

/// Result of a provider reachability probe. Never mutates engine state.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderHealth {
    pub status: HealthStatus,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProviderHealth {
    pub fn healthy(provider: &str) -> Self {
        Self {
            status: HealthStatus::Healthy,
            provider: provider.to_string(),
            models: None,
            error: None,
        }
    }

    pub fn unhealthy(provider: &str, error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            provider: provider.to_string(),
            models: None,
            error: Some(error.into()),
        }
    }

    pub fn unreachable(provider: &str, error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Error,
            provider: provider.to_string(),
            models: None,
            error: Some(error.into()),
        }
    }
}

/// Capability interface over interchangeable LLM backends.
///
/// One invocation issues exactly one outbound call with a bounded timeout.
/// There is no retry at this layer; fallback policy belongs to the
/// orchestrator.
#[async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Run one analysis task and return the decoded structured value, or the
    /// raw-text wrap when the response carried no decodable object.
    async fn analyze(&self, task: &ProviderTask) -> Result<Value, EngineError>;

    /// Lightweight reachability probe specific to this backend.
    async fn health_check(&self) -> ProviderHealth;
}
