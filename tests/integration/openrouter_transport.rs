use agentprompt::error::FailureKind;
use agentprompt::format::FormatId;
use agentprompt::provider::classify;
use agentprompt::provider::clients::{
    CompletionRequest, GenerationTransport, OpenRouterClient, DEFAULT_APP_TITLE,
};
use agentprompt::provider::{GenerationDispatcher, GenerationRequest, ProviderCatalog, ProviderId};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(model_id: &str) -> CompletionRequest {
    CompletionRequest {
        api_key: "sk-or-test".to_string(),
        model_id: model_id.to_string(),
        user_input: "Name three colors".to_string(),
        system_instruction: "Answer in a list.".to_string(),
        temperature: 0.3,
        json_mode: false,
        thinking_budget: None,
    }
}

fn client(server: &MockServer) -> OpenRouterClient {
    OpenRouterClient::with_endpoint(
        format!("{}/api/v1/chat/completions", server.uri()),
        DEFAULT_APP_TITLE,
    )
}

#[tokio::test]
async fn successful_completion_returns_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-or-test"))
        .and(header("x-title", "AI Prompt Agent"))
        .and(body_partial_json(json!({
            "model": "openai/gpt-4o",
            "messages": [
                {"role": "system", "content": "Answer in a list."},
                {"role": "user", "content": "Name three colors"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "- red\n- green\n- blue"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .complete(&completion("openai/gpt-4o"))
        .await
        .unwrap();
    assert_eq!(text.as_deref(), Some("- red\n- green\n- blue"));
}

#[tokio::test]
async fn rate_limit_without_body_gets_aggregator_guidance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&completion("mistralai/mistral-7b-instruct:free"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::TransportError);
    assert_eq!(err.status, Some(429));
    assert_eq!(err.message, "OpenRouter API Error: 429 Too Many Requests");

    let rendered = classify::user_message(&err);
    assert!(rendered.starts_with("Error: "));
    assert!(rendered.contains("Switch to a different model"));
    assert!(rendered.contains("Upgrade"));
}

#[tokio::test]
async fn nested_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "error": {"code": 402, "message": "This request requires more credits"}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&completion("openai/gpt-4o"))
        .await
        .unwrap_err();
    assert_eq!(err.message, "This request requires more credits");
    assert!(classify::user_message(&err).contains("Add credit"));
}

#[tokio::test]
async fn dispatcher_pretty_prints_fenced_json_from_aggregator() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "```json\n{\"b\":1,\"a\":[true]}\n```"}}]
        })))
        .mount(&server)
        .await;

    let aggregator = Arc::new(client(&server));
    let dispatcher = GenerationDispatcher::new(
        ProviderCatalog::builtin(),
        Arc::new(agentprompt::provider::clients::GeminiClient::with_base_url(server.uri())),
        aggregator,
    );
    let text = dispatcher
        .generate(&GenerationRequest {
            provider_id: ProviderId::OpenRouter,
            api_key: "sk-or-test".to_string(),
            model_id: "openai/gpt-4o".to_string(),
            user_input: "data please".to_string(),
            system_instruction: "Emit JSON.".to_string(),
            output_format: FormatId::Json,
        })
        .await
        .unwrap();
    assert_eq!(text, "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}");
}

#[tokio::test]
async fn empty_content_is_an_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": ""}}]
        })))
        .mount(&server)
        .await;

    let dispatcher = GenerationDispatcher::new(
        ProviderCatalog::builtin(),
        Arc::new(agentprompt::provider::clients::GeminiClient::with_base_url(server.uri())),
        Arc::new(client(&server)),
    );
    let err = dispatcher
        .generate(&GenerationRequest {
            provider_id: ProviderId::OpenRouter,
            api_key: "sk-or-test".to_string(),
            model_id: "openai/gpt-4o".to_string(),
            user_input: "anything".to_string(),
            system_instruction: "x".to_string(),
            output_format: FormatId::DetailedText,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::EmptyResponse);
    assert_eq!(
        err.message,
        "No content generated or API returned an empty response."
    );
}
