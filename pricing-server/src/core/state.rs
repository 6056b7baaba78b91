//! Server State
//!
//! Cloned into every handler; all members are cheap `Arc` clones.

use std::sync::Arc;

use crate::core::Config;
use crate::db::{InMemoryStore, PricingStore};
use crate::services::PricingService;

#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pricing: PricingService,
}

impl ServerState {
    /// Build state over any store
    pub fn new(config: Config, store: Arc<dyn PricingStore>) -> Self {
        Self {
            config: Arc::new(config),
            pricing: PricingService::new(store),
        }
    }

    /// Build state over a fresh in-memory store
    pub fn initialize(config: &Config) -> Self {
        tracing::info!(environment = %config.environment, "Using in-memory store");
        Self::new(config.clone(), Arc::new(InMemoryStore::new()))
    }
}
