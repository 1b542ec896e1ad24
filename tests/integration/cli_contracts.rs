use agentprompt::config::AppConfig;
use agentprompt::tooling::cli::{
    AgentCommands, AgentFields, CliContext, Commands, FormatCommands, KeyCommands,
    ProviderCommands,
};
use tempfile::TempDir;

fn context(temp_dir: &TempDir) -> CliContext {
    CliContext::new(&AppConfig::default(), Some(temp_dir.path().join("store"))).unwrap()
}

#[test]
fn agent_list_json_contract_has_required_fields() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);

    let output = cli
        .execute(&Commands::Agent {
            command: AgentCommands::List {
                format: "json".to_string(),
            },
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let active = parsed["activeAgentId"].as_str().unwrap();
    let agents = parsed["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0]["id"], active);
    for key in [
        "name",
        "description",
        "inputPlaceholder",
        "outputFormat",
        "customInstructions",
        "providerId",
        "modelId",
    ] {
        assert!(agents[0].get(key).is_some(), "missing {}", key);
    }
}

#[test]
fn created_agent_and_key_persist_across_contexts() {
    let temp_dir = TempDir::new().unwrap();
    let created = {
        let mut cli = context(&temp_dir);
        cli.execute(&Commands::Key {
            command: KeyCommands::Set {
                provider: Some("google".to_string()),
                key: "AIza-persisted".to_string(),
            },
        })
        .unwrap();
        let output = cli
            .execute(&Commands::Agent {
                command: AgentCommands::Create {
                    fields: AgentFields {
                        name: Some("Spec Writer".to_string()),
                        instructions: Some("Write precise specs.".to_string()),
                        output_format: Some("pseudo_dsl".to_string()),
                        ..AgentFields::default()
                    },
                },
            })
            .unwrap();
        output
            .rsplit(' ')
            .next()
            .unwrap()
            .to_string()
    };

    let cli = context(&temp_dir);
    let session = cli.session();
    let active = session.registry().active().unwrap();
    assert_eq!(active.id, created);
    assert_eq!(active.name, "Spec Writer");
    assert_eq!(
        session
            .settings()
            .api_key(agentprompt::provider::ProviderId::Google),
        Some("AIza-persisted")
    );
}

#[test]
fn provider_list_json_lists_catalog_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);
    let output = cli
        .execute(&Commands::Provider {
            command: ProviderCommands::List {
                format: "json".to_string(),
            },
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let ids: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["google", "openrouter", "openai", "anthropic", "custom"]);
}

#[test]
fn format_show_prints_template() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);
    let output = cli
        .execute(&Commands::Format {
            command: FormatCommands::Show {
                format_id: "json".to_string(),
            },
        })
        .unwrap();
    assert!(output.contains("\"generated_at\""));
    assert!(!output.contains("{{generated_at}}"));
}

#[test]
fn compose_for_unknown_agent_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let mut cli = context(&temp_dir);
    let err = cli
        .execute(&Commands::Compose {
            agent: Some("agent_missing".to_string()),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Agent not found: agent_missing");
}
