use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PetPredicate, PetService};
use crate::models::Pet;

/// Process-local pet store
///
/// Pets are kept in insertion order. Adding a pet whose id is already stored
/// replaces it in place.
#[derive(Default)]
pub struct InMemoryPetService {
    pets: RwLock<Vec<Pet>>,
}

impl InMemoryPetService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pets(pets: Vec<Pet>) -> Self {
        Self {
            pets: RwLock::new(pets),
        }
    }
}

#[async_trait]
impl PetService for InMemoryPetService {
    async fn get_all(&self) -> Result<Vec<Pet>> {
        let mut pets = self.pets.read().await.clone();
        pets.sort_by_key(|pet| pet.id);
        Ok(pets)
    }

    async fn find_one(&self, predicate: PetPredicate<'_>) -> Result<Option<Pet>> {
        let pets = self.pets.read().await;
        Ok(pets.iter().find(|pet| predicate(*pet)).cloned())
    }

    async fn add(&self, pet: Pet) -> Result<Pet> {
        let mut pets = self.pets.write().await;
        match pets.iter_mut().find(|stored| stored.id == pet.id) {
            Some(stored) => {
                *stored = pet.clone();
                tracing::debug!("Replaced pet with id: {}", pet.id);
            }
            None => {
                pets.push(pet.clone());
                tracing::debug!("Added pet with id: {}", pet.id);
            }
        }
        Ok(pet)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(id: i32, name: &str) -> Pet {
        Pet {
            id,
            name: name.to_string(),
            tag: None,
        }
    }

    #[tokio::test]
    async fn test_empty_store() {
        let service = InMemoryPetService::new();
        assert!(service.get_all().await.unwrap().is_empty());
        assert_eq!(service.find_one(&|_: &Pet| true).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_then_find() {
        let service = InMemoryPetService::new();
        let added = service.add(pet(7, "Rex")).await.unwrap();
        assert_eq!(added, pet(7, "Rex"));

        let found = service.find_one(&|p: &Pet| p.id == 7).await.unwrap();
        assert_eq!(found, Some(pet(7, "Rex")));
        assert_eq!(service.find_one(&|p: &Pet| p.id == 8).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_all_orders_by_id() {
        let service = InMemoryPetService::with_pets(vec![pet(3, "c"), pet(1, "a"), pet(2, "b")]);
        let ids: Vec<i32> = service.get_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_add_existing_id_replaces_pet() {
        let service = InMemoryPetService::with_pets(vec![pet(5, "old"), pet(6, "other")]);

        service.add(pet(5, "new")).await.unwrap();

        assert_eq!(service.find_by_id(5).await.unwrap(), Some(pet(5, "new")));
        let names: Vec<String> = service
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["new", "other"]);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let service = InMemoryPetService::with_pets(vec![pet(1, "a"), pet(2, "b")]);
        assert_eq!(service.find_by_id(2).await.unwrap(), Some(pet(2, "b")));
        assert_eq!(service.find_by_id(3).await.unwrap(), None);
    }

    #[test]
    fn test_service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryPetService>();
    }
}
