use agentprompt::provider::classify::{classify, FailureClass};
use agentprompt::provider::clients::{CompletionRequest, GeminiClient, GenerationTransport};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(model_id: &str, json_mode: bool, thinking_budget: Option<u32>) -> CompletionRequest {
    CompletionRequest {
        api_key: "AIza-test".to_string(),
        model_id: model_id.to_string(),
        user_input: "Improve my checkout page".to_string(),
        system_instruction: "You are a design expert.".to_string(),
        temperature: 0.3,
        json_mode,
        thinking_budget,
    }
}

#[tokio::test]
async fn request_carries_instruction_and_generation_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/v1beta/models/gemini-2.5-flash-preview-04-17:generateContent",
        ))
        .and(header("x-goog-api-key", "AIza-test"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Improve my checkout page"}]}],
            "systemInstruction": {"parts": [{"text": "You are a design expert."}]},
            "generationConfig": {
                "responseMimeType": "application/json",
                "thinkingConfig": {"thinkingBudget": 0}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"ok\":"}, {"text": "true}"}]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = GeminiClient::with_base_url(server.uri())
        .complete(&completion("gemini-2.5-flash-preview-04-17", true, Some(0)))
        .await
        .unwrap();
    assert_eq!(text.as_deref(), Some("{\"ok\":true}"));
}

#[tokio::test]
async fn candidate_without_text_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let text = GeminiClient::with_base_url(server.uri())
        .complete(&completion("gemini-2.5-pro-preview-05-06", false, None))
        .await
        .unwrap();
    assert_eq!(text, None);
}

#[tokio::test]
async fn resource_exhausted_is_classified_as_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Quota exceeded for quota metric 'Generate Content API requests per minute'",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .mount(&server)
        .await;

    let err = GeminiClient::with_base_url(server.uri())
        .complete(&completion("gemini-2.5-pro-preview-05-06", false, None))
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(429));
    assert!(err.message.contains("RESOURCE_EXHAUSTED"));
    assert_eq!(classify(&err), FailureClass::QuotaExhausted);
}
