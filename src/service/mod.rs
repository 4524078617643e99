//! Pet data access.
//!
//! Handlers only see the [`PetService`] trait; the concrete store is chosen
//! at startup from [`PetStore`].

pub mod memory;
pub mod spanner;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Config, PetStore};
use crate::models::Pet;

pub use memory::InMemoryPetService;
pub use spanner::SpannerPetService;

/// Predicate handed to [`PetService::find_one`]
pub type PetPredicate<'a> = &'a (dyn Fn(&Pet) -> bool + Send + Sync);

#[async_trait]
pub trait PetService: Send + Sync {
    /// Every stored pet, ordered by id
    async fn get_all(&self) -> Result<Vec<Pet>>;

    /// First pet matching `predicate`, if any
    async fn find_one(&self, predicate: PetPredicate<'_>) -> Result<Option<Pet>>;

    /// Pet stored under `id`, if any
    ///
    /// Stores that can look a key up directly should override this.
    async fn find_by_id(&self, id: i32) -> Result<Option<Pet>> {
        self.find_one(&|pet: &Pet| pet.id == id).await
    }

    /// Store `pet` and return it as stored
    ///
    /// A pet whose id is already stored replaces the existing one.
    async fn add(&self, pet: Pet) -> Result<Pet>;

    /// Verify the backing store is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Build the pet store selected by the configuration
pub async fn from_config(config: &Config) -> Result<Arc<dyn PetService>> {
    match &config.pet_store {
        PetStore::Memory => {
            tracing::info!("Using in-memory pet store");
            Ok(Arc::new(InMemoryPetService::new()))
        }
        PetStore::Spanner(spanner) => Ok(Arc::new(SpannerPetService::from_config(spanner).await?)),
    }
}
