//! Hosted chat-completions provider with a bearer credential.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{error, info};

use crate::error::EngineError;

use super::extract::decode_reply;
use super::prompt::{build_prompt, SYSTEM_PROMPT};
use super::provider::{LlmProvider, ProviderHealth, ProviderTask};

const PROVIDER_NAME: &str = "openai";
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl OpenAiProvider {
    /// Fails with `ProviderMisconfigured` when no credential is present.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, EngineError> {
        let api_key = api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
            EngineError::ProviderMisconfigured("OPENAI_API_KEY is not set".to_string())
        })?;

        Ok(Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            client: Client::new(),
        })
    }

    fn unavailable(&self, reason: impl Into<String>) -> EngineError {
        EngineError::ProviderUnavailable {
            provider: PROVIDER_NAME.to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn analyze(&self, task: &ProviderTask) -> Result<Value, EngineError> {
        let prompt = build_prompt(task);
        info!(kind = task.kind.as_str(), model = %self.model, "dispatching openai analysis");

        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.1,
            "max_tokens": 1000
        });

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send();

        let response = timeout(COMPLETION_TIMEOUT, request)
            .await
            .map_err(|_| self.unavailable("request timed out after 60s"))?
            .map_err(|e| {
                error!("OpenAI request failed: {e}");
                self.unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("OpenAI API returned status {status}");
            return Err(self.unavailable(format!("HTTP {status}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| self.unavailable(format!("malformed response body: {e}")))?;
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| self.unavailable("response carried no message content"))?;

        Ok(decode_reply(content, task.kind))
    }

    /// Credential-presence check; no outbound call is made.
    async fn health_check(&self) -> ProviderHealth {
        if self.api_key.is_empty() {
            return ProviderHealth::unhealthy(PROVIDER_NAME, "API key is not configured");
        }
        ProviderHealth::healthy(PROVIDER_NAME)
    }
}
