use crate::config::Config;
use crate::service::PetService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pets: Arc<dyn PetService>,
    pub config: Arc<Config>,
}

#[cfg(test)]
impl AppState {
    /// State backed by an in-memory store seeded with `pets`
    pub fn in_memory(pets: Vec<crate::models::Pet>) -> Self {
        AppState {
            pets: Arc::new(crate::service::InMemoryPetService::with_pets(pets)),
            config: Arc::new(Config::default()),
        }
    }
}
