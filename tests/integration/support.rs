//! Shared fixtures: a scripted transport and session builders.

use agentprompt::error::GenerationError;
use agentprompt::provider::clients::{CompletionRequest, GenerationTransport};
use agentprompt::provider::{GenerationDispatcher, ProviderCatalog};
use agentprompt::session::Session;
use agentprompt::store::{KeyValueStore, MemoryStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct ScriptedTransport {
    reply: Result<Option<String>, GenerationError>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedTransport {
    pub fn replying(reply: Result<Option<String>, GenerationError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl GenerationTransport for ScriptedTransport {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, GenerationError> {
        self.calls.lock().push(request.clone());
        self.reply.clone()
    }
}

/// Session over `store` whose primary and aggregator transports are separate scripts.
pub fn scripted_session(
    store: Arc<dyn KeyValueStore>,
    primary: Arc<ScriptedTransport>,
    aggregator: Arc<ScriptedTransport>,
) -> Session {
    let dispatcher = GenerationDispatcher::new(ProviderCatalog::builtin(), primary, aggregator);
    Session::open(store, dispatcher).unwrap()
}

pub fn memory_store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}
