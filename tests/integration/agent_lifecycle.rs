use agentprompt::agent::{Agent, AgentRegistry, DeleteOutcome, KvAgentStorage, SavedAgent};
use agentprompt::error::ApiError;
use crate::integration::support::{scripted_session, ScriptedTransport};
use agentprompt::format::FormatId;
use agentprompt::provider::{ProviderCatalog, ProviderId};
use agentprompt::store::{
    KeyValueStore, SledKeyValueStore, ACTIVE_AGENT_KEY, ACTIVE_PROVIDER_KEY, AGENTS_KEY,
    API_KEYS_KEY,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn open_registry(store: Arc<dyn KeyValueStore>) -> AgentRegistry {
    AgentRegistry::load(
        Arc::new(KvAgentStorage::new(store)),
        ProviderCatalog::builtin(),
    )
    .unwrap()
}

fn agent(name: &str, provider: &str, model: &str) -> Agent {
    Agent {
        name: name.to_string(),
        provider_id: provider.to_string(),
        model_id: model.to_string(),
        custom_instructions: format!("You are {}.", name),
        ..Agent::default()
    }
}

#[test]
fn agents_survive_reopening_the_sled_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store");

    let saved_agent = {
        let store: Arc<dyn KeyValueStore> = Arc::new(SledKeyValueStore::open(&path).unwrap());
        let mut registry = open_registry(store);
        let translator = Agent {
            name: "Translator".to_string(),
            description: "Turns French notes into English prose.".to_string(),
            input_placeholder: "Paste French text...".to_string(),
            output_format: FormatId::PseudoDsl,
            custom_instructions: "Translate faithfully.\nKeep technical terms.".to_string(),
            provider_id: "openrouter".to_string(),
            model_id: "openai/gpt-4o".to_string(),
            ..Agent::default()
        };
        let saved = registry.save(translator).unwrap();
        registry.select(saved.id()).unwrap();
        registry.get(saved.id()).cloned().unwrap()
    };

    let store: Arc<dyn KeyValueStore> = Arc::new(SledKeyValueStore::open(&path).unwrap());
    let registry = open_registry(store);
    assert_eq!(registry.agents().len(), 2);
    assert_eq!(registry.active(), Some(&saved_agent));
    assert_eq!(registry.get(&saved_agent.id), Some(&saved_agent));
}

#[test]
fn session_opens_over_unreadable_settings_slots() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store");
    {
        let db = sled::open(&path).unwrap();
        let tree = db.open_tree("settings").unwrap();
        tree.insert(ACTIVE_PROVIDER_KEY, &[0xff, 0xfe][..]).unwrap();
        tree.insert(API_KEYS_KEY, &[0xff, 0xfe][..]).unwrap();
        db.flush().unwrap();
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(SledKeyValueStore::open(&path).unwrap());
    let session = scripted_session(
        store,
        ScriptedTransport::replying(Ok(None)),
        ScriptedTransport::replying(Ok(None)),
    );
    assert_eq!(session.settings().active_provider(), ProviderId::Google);
    assert!(!session.settings().has_api_key(ProviderId::Google));
    assert_eq!(session.registry().agents().len(), 1);
}

#[test]
fn stored_agent_with_retired_provider_is_repaired_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let store: Arc<dyn KeyValueStore> =
        Arc::new(SledKeyValueStore::open(&temp_dir.path().join("store")).unwrap());
    store
        .set(
            AGENTS_KEY,
            &json!([{
                "id": "agent_1700000000000_abc1234",
                "name": "Legacy",
                "description": "Imported",
                "inputPlaceholder": "",
                "outputFormat": "claude_style",
                "customInstructions": "Keep it short.",
                "providerId": "palm",
                "modelId": "text-bison-001"
            }])
            .to_string(),
        )
        .unwrap();

    let registry = open_registry(store.clone());
    let legacy = registry.get("agent_1700000000000_abc1234").unwrap();
    assert_eq!(legacy.provider_id, "google");
    assert_eq!(legacy.model_id, "gemini-2.5-flash-preview-04-17");
    assert_eq!(legacy.name, "Legacy");
    assert_eq!(legacy.custom_instructions, "Keep it short.");
    assert_eq!(
        store.get(ACTIVE_AGENT_KEY).unwrap().as_deref(),
        Some("agent_1700000000000_abc1234")
    );
}

#[test]
fn records_without_ids_receive_fresh_unique_ids() {
    let store: Arc<dyn KeyValueStore> = Arc::new(agentprompt::store::MemoryStore::new());
    store
        .set(AGENTS_KEY, &json!([{"name": "A"}, {"name": "B", "id": ""}]).to_string())
        .unwrap();
    let registry = open_registry(store);
    let ids: Vec<&str> = registry.agents().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| id.starts_with("agent_")));
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn deleting_down_to_one_agent_then_refusing() {
    let store: Arc<dyn KeyValueStore> = Arc::new(agentprompt::store::MemoryStore::new());
    let mut registry = open_registry(store);
    let first = registry.agents()[0].id.clone();
    let SavedAgent::Created(second) = registry
        .save(agent("Second", "google", "gemini-2.5-pro-preview-05-06"))
        .unwrap()
    else {
        panic!("expected a created agent");
    };
    registry.select(&second).unwrap();

    assert_eq!(
        registry.delete(&first, |_| true).unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(registry.active_agent_id(), Some(second.as_str()));

    let result = registry.delete(&second, |_| true);
    assert!(matches!(result, Err(ApiError::LastAgent)));
    assert_eq!(registry.agents().len(), 1);
}

#[test]
fn every_stored_agent_has_a_model_its_provider_offers() {
    let catalog = ProviderCatalog::builtin();
    let store: Arc<dyn KeyValueStore> = Arc::new(agentprompt::store::MemoryStore::new());
    let mut registry = open_registry(store);
    registry.save(agent("A", "anthropic", "gpt-4o")).unwrap();
    registry.save(agent("B", "custom", "")).unwrap();
    registry.save(agent("C", "nonsense", "nonsense")).unwrap();

    for stored in registry.agents() {
        let provider = catalog.find_str(&stored.provider_id).unwrap();
        assert!(
            stored.model_id.is_empty() || provider.has_model(&stored.model_id),
            "{} has {} under {}",
            stored.name,
            stored.model_id,
            stored.provider_id
        );
    }
}
