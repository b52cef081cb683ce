//! Provider Tests
//!
//! Concrete provider behavior against a mock HTTP server: request shape,
//! response decoding, degradation and health probes.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::EngineError;
use crate::llm::{HealthStatus, LlmProvider, OllamaProvider, OpenAiProvider, ProviderTask};
use crate::models::AnalysisKind;

fn sentiment_task() -> ProviderTask {
    super::init_tracing();
    ProviderTask::new(AnalysisKind::Sentiment, "这个产品质量很好")
}

// ============================================================================
// Ollama
// ============================================================================

#[tokio::test]
async fn test_ollama_decodes_embedded_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"model": "qwen2.5:7b", "stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "分析结果：{\"sentiment\": \"积极\", \"score\": 0.9, \"confidence\": \"高\"} 以上。"
        })))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "qwen2.5:7b");
    let value = provider.analyze(&sentiment_task()).await.unwrap();

    assert_eq!(value["sentiment"], "积极");
    assert_eq!(value["score"], 0.9);
}

#[tokio::test]
async fn test_ollama_wraps_non_json_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "这段回答完全没有结构化内容"
        })))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "qwen2.5:7b");
    let value = provider.analyze(&sentiment_task()).await.unwrap();

    assert_eq!(value["raw_response"], "这段回答完全没有结构化内容");
    assert_eq!(value["analysis_type"], "sentiment");
}

#[tokio::test]
async fn test_ollama_non_success_status_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "qwen2.5:7b");
    let err = provider.analyze(&sentiment_task()).await.unwrap_err();

    match err {
        EngineError::ProviderUnavailable { provider, reason } => {
            assert_eq!(provider, "ollama");
            assert!(reason.contains("500"), "reason was {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_ollama_unreachable_host_is_unavailable() {
    // Nothing listens on this port.
    let provider = OllamaProvider::new("http://127.0.0.1:1", "qwen2.5:7b");
    let err = provider.analyze(&sentiment_task()).await.unwrap_err();
    assert!(matches!(err, EngineError::ProviderUnavailable { .. }));
}

#[tokio::test]
async fn test_ollama_health_lists_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {"name": "qwen2.5:7b"},
                {"name": "llama3.1:8b"}
            ]
        })))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "qwen2.5:7b");
    let health = provider.health_check().await;

    assert_eq!(health.status, HealthStatus::Healthy);
    assert_eq!(
        health.models,
        Some(vec!["qwen2.5:7b".to_string(), "llama3.1:8b".to_string()])
    );
}

#[tokio::test]
async fn test_ollama_health_unreachable() {
    let provider = OllamaProvider::new("http://127.0.0.1:1", "qwen2.5:7b");
    let health = provider.health_check().await;
    assert_eq!(health.status, HealthStatus::Error);
    assert!(health.error.is_some());
}

#[tokio::test]
async fn test_ollama_health_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "qwen2.5:7b");
    let health = provider.health_check().await;
    assert_eq!(health.status, HealthStatus::Unhealthy);
}

// ============================================================================
// OpenAI
// ============================================================================

#[tokio::test]
async fn test_openai_sends_bearer_and_decodes_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-3.5-turbo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"content": "{\"sentiment\": \"中性\", \"score\": 0.5}"}}
            ]
        })))
        .mount(&server)
        .await;

    let provider =
        OpenAiProvider::new(server.uri(), "gpt-3.5-turbo", Some("sk-test".to_string())).unwrap();
    let value = provider.analyze(&sentiment_task()).await.unwrap();

    assert_eq!(value["sentiment"], "中性");
}

#[tokio::test]
async fn test_openai_missing_credential_fails_construction() {
    let err = OpenAiProvider::new("https://api.openai.com/v1", "gpt-3.5-turbo", None).unwrap_err();
    assert!(matches!(err, EngineError::ProviderMisconfigured(_)));

    let err = OpenAiProvider::new(
        "https://api.openai.com/v1",
        "gpt-3.5-turbo",
        Some(String::new()),
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::ProviderMisconfigured(_)));
}

#[tokio::test]
async fn test_openai_missing_content_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let provider =
        OpenAiProvider::new(server.uri(), "gpt-3.5-turbo", Some("sk-test".to_string())).unwrap();
    let err = provider.analyze(&sentiment_task()).await.unwrap_err();
    assert!(matches!(err, EngineError::ProviderUnavailable { .. }));
}

#[tokio::test]
async fn test_openai_bad_status_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let provider =
        OpenAiProvider::new(server.uri(), "gpt-3.5-turbo", Some("sk-bad".to_string())).unwrap();
    let err = provider.analyze(&sentiment_task()).await.unwrap_err();

    match err {
        EngineError::ProviderUnavailable { provider, reason } => {
            assert_eq!(provider, "openai");
            assert!(reason.contains("401"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_openai_health_reports_credential_presence() {
    let provider =
        OpenAiProvider::new("https://api.openai.com/v1", "gpt-3.5-turbo", Some("sk-test".to_string()))
            .unwrap();
    let health = provider.health_check().await;
    assert_eq!(health.status, HealthStatus::Healthy);
    assert_eq!(health.provider, "openai");
}
