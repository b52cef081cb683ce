//! Local inference provider speaking the `/api/generate` protocol.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{error, info};

use crate::error::EngineError;

use super::extract::decode_reply;
use super::prompt::build_prompt;
use super::provider::{LlmProvider, ProviderHealth, ProviderTask};

const PROVIDER_NAME: &str = "ollama";
const GENERATE_TIMEOUT: Duration = Duration::from_secs(60);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub struct OllamaProvider {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaProvider {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            client: Client::new(),
        }
    }

    fn unavailable(&self, reason: impl Into<String>) -> EngineError {
        EngineError::ProviderUnavailable {
            provider: PROVIDER_NAME.to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn analyze(&self, task: &ProviderTask) -> Result<Value, EngineError> {
        let prompt = build_prompt(task);
        info!(kind = task.kind.as_str(), model = %self.model, "dispatching ollama analysis");

        let payload = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": 0.1,
                "top_p": 0.9,
                "max_tokens": 1000
            }
        });

        let request = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&payload)
            .send();

        let response = timeout(GENERATE_TIMEOUT, request)
            .await
            .map_err(|_| self.unavailable("request timed out after 60s"))?
            .map_err(|e| {
                error!("Ollama request failed: {e}");
                self.unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Ollama API returned status {status}");
            return Err(self.unavailable(format!("HTTP {status}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| self.unavailable(format!("malformed response body: {e}")))?;
        let content = body
            .get("response")
            .and_then(Value::as_str)
            .unwrap_or_default();

        Ok(decode_reply(content, task.kind))
    }

    async fn health_check(&self) -> ProviderHealth {
        let request = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send();

        match request.await {
            Ok(response) if response.status().is_success() => {
                let models = response
                    .json::<Value>()
                    .await
                    .ok()
                    .and_then(|body| {
                        body.get("models").and_then(Value::as_array).map(|models| {
                            models
                                .iter()
                                .filter_map(|m| m.get("name").and_then(Value::as_str))
                                .map(str::to_string)
                                .collect()
                        })
                    })
                    .unwrap_or_default();
                ProviderHealth {
                    models: Some(models),
                    ..ProviderHealth::healthy(PROVIDER_NAME)
                }
            }
            Ok(response) => {
                ProviderHealth::unhealthy(PROVIDER_NAME, format!("HTTP {}", response.status()))
            }
            Err(e) => ProviderHealth::unreachable(PROVIDER_NAME, e.to_string()),
        }
    }
}
