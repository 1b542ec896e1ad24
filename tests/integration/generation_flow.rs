use crate::integration::support::{memory_store, scripted_session, ScriptedTransport};
use agentprompt::agent::Agent;
use agentprompt::error::GenerationError;
use agentprompt::format::FormatId;
use agentprompt::provider::ProviderId;
use agentprompt::session::SubmitOutcome;

#[tokio::test]
async fn missing_key_names_the_key_field_and_never_dispatches() {
    let primary = ScriptedTransport::replying(Ok(Some("unused".to_string())));
    let aggregator = ScriptedTransport::replying(Ok(Some("unused".to_string())));
    let mut session = scripted_session(memory_store(), primary.clone(), aggregator.clone());

    let agent = Agent {
        name: "Router".to_string(),
        provider_id: "openrouter".to_string(),
        model_id: "openai/gpt-4o".to_string(),
        ..Agent::default()
    };
    let id = session.registry_mut().save(agent).unwrap().id().to_string();
    session.select_agent(&id).unwrap();

    let outcome = session.submit("Write a haiku").await;
    let SubmitOutcome::Rejected(message) = outcome else {
        panic!("expected a rejection");
    };
    assert!(message.contains("OpenRouter API Key"));
    assert!(message.contains("OpenRouter (Multi-Provider)"));
    assert!(!session.is_request_in_flight());
    assert!(primary.calls().is_empty());
    assert!(aggregator.calls().is_empty());
}

#[tokio::test]
async fn json_agent_gets_json_mode_and_pretty_output() {
    let primary = ScriptedTransport::replying(Ok(Some(
        "```json\n{\"title\":\"Checkout\",\"steps\":[1,2]}\n```".to_string(),
    )));
    let aggregator = ScriptedTransport::replying(Ok(None));
    let mut session = scripted_session(memory_store(), primary.clone(), aggregator);

    let agent = Agent {
        name: "Structurer".to_string(),
        output_format: FormatId::Json,
        ..Agent::default()
    };
    let id = session.registry_mut().save(agent).unwrap().id().to_string();
    session.select_agent(&id).unwrap();
    session
        .settings_mut()
        .set_api_key(ProviderId::Google, "AIza-test")
        .unwrap();

    let outcome = session.submit("Outline the checkout").await;
    assert_eq!(
        outcome,
        SubmitOutcome::Generated(
            "{\n  \"title\": \"Checkout\",\n  \"steps\": [\n    1,\n    2\n  ]\n}".to_string()
        )
    );

    let calls = primary.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].json_mode);
    assert_eq!(calls[0].thinking_budget, Some(0));
    assert!((calls[0].temperature - 0.3).abs() < f32::EPSILON);
    assert!(calls[0].system_instruction.contains("\"generated_at\""));
}

#[tokio::test]
async fn pro_model_runs_without_thinking_override() {
    let primary = ScriptedTransport::replying(Ok(Some("plain".to_string())));
    let aggregator = ScriptedTransport::replying(Ok(None));
    let mut session = scripted_session(memory_store(), primary.clone(), aggregator);

    let mut agent = session.registry().active().unwrap().clone();
    agent.model_id = "gemini-2.5-pro-preview-05-06".to_string();
    session.registry_mut().save(agent).unwrap();
    session
        .settings_mut()
        .set_api_key(ProviderId::Google, "AIza-test")
        .unwrap();

    assert_eq!(
        session.submit("hello").await,
        SubmitOutcome::Generated("plain".to_string())
    );
    let calls = primary.calls();
    assert_eq!(calls[0].thinking_budget, None);
    assert!(!calls[0].json_mode);
}

#[tokio::test]
async fn failure_is_rendered_into_the_output_area() {
    let primary = ScriptedTransport::replying(Err(GenerationError::transport(
        ProviderId::Google,
        "[403 PERMISSION_DENIED] Method doesn't allow unregistered callers",
    )
    .with_status(403)));
    let aggregator = ScriptedTransport::replying(Ok(None));
    let mut session = scripted_session(memory_store(), primary, aggregator);
    session
        .settings_mut()
        .set_api_key(ProviderId::Google, "AIza-test")
        .unwrap();

    let outcome = session.submit("hello").await;
    assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
    assert!(session.output().starts_with("Error: "));
    assert!(session.output().contains("PERMISSION_DENIED"));
    assert!(!session.is_request_in_flight());
}

#[tokio::test]
async fn custom_provider_with_key_is_reported_unsupported() {
    let primary = ScriptedTransport::replying(Ok(Some("unused".to_string())));
    let aggregator = ScriptedTransport::replying(Ok(Some("unused".to_string())));
    let mut session = scripted_session(memory_store(), primary.clone(), aggregator.clone());

    let agent = Agent {
        name: "Custom".to_string(),
        provider_id: "custom".to_string(),
        model_id: "custom-model".to_string(),
        ..Agent::default()
    };
    let id = session.registry_mut().save(agent).unwrap().id().to_string();
    session.select_agent(&id).unwrap();
    session
        .settings_mut()
        .set_api_key(ProviderId::Custom, "key")
        .unwrap();

    let outcome = session.submit("hello").await;
    assert!(outcome
        .text()
        .contains("\"Custom Provider - Placeholder\" is not directly supported"));
    assert!(primary.calls().is_empty());
    assert!(aggregator.calls().is_empty());
}
