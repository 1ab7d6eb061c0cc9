use async_trait::async_trait;
use eyre::Result;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::availability::Availability;

/// Persistence for availability blocks
#[async_trait]
pub trait AvailabilityStorage: Send + Sync {
    /// Returns every stored block, ordered by start
    async fn list(&self) -> Result<Vec<Availability>>;

    /// Replaces the block with the same id, or inserts the block under a new
    /// id when it has none. Returns the block as stored.
    async fn upsert(&self, availability: Availability) -> Result<Availability>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Process-local [`AvailabilityStorage`]
#[derive(Debug, Default)]
pub struct InMemoryAvailabilityStorage {
    availabilities: RwLock<HashMap<Uuid, Availability>>,
}

impl InMemoryAvailabilityStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage holding `availabilities`, assigning ids to blocks
    /// that have none
    pub fn with_availabilities(availabilities: impl IntoIterator<Item = Availability>) -> Self {
        let availabilities = availabilities
            .into_iter()
            .map(|mut availability| {
                let id = *availability.id.get_or_insert_with(Uuid::new_v4);
                (id, availability)
            })
            .collect();

        Self {
            availabilities: RwLock::new(availabilities),
        }
    }
}

#[async_trait]
impl AvailabilityStorage for InMemoryAvailabilityStorage {
    async fn list(&self) -> Result<Vec<Availability>> {
        let mut availabilities: Vec<Availability> =
            self.availabilities.read().await.values().cloned().collect();
        availabilities.sort_by_key(|availability| availability.start_utc);
        Ok(availabilities)
    }

    async fn upsert(&self, mut availability: Availability) -> Result<Availability> {
        let id = *availability.id.get_or_insert_with(Uuid::new_v4);
        self.availabilities
            .write()
            .await
            .insert(id, availability.clone());
        Ok(availability)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.availabilities.write().await.remove(&id);
        Ok(())
    }
}
