use crate::config::ServerConfig;
use std::sync::Arc;
use strana::{NaturalLanguageTranslator, StringStore};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// String store (shared across requests; synchronized internally)
    pub store: Arc<StringStore>,

    /// Natural-language rule table, built once at startup
    pub translator: Arc<NaturalLanguageTranslator>,
}

impl ServerState {
    /// Create new server state with an empty in-memory store
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, StringStore::new())
    }

    /// Create server state over an existing store
    pub fn with_store(config: ServerConfig, store: StringStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            translator: Arc::new(NaturalLanguageTranslator::new()),
        }
    }
}
