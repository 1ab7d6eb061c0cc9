use async_trait::async_trait;
use availabilities_core::{models::availability::Availability, storage::AvailabilityStorage};
use eyre::Result;
use uuid::Uuid;

use crate::{DbPool, repositories::availability};

/// [`AvailabilityStorage`] backed by the `availabilities` table
#[derive(Debug, Clone)]
pub struct PgAvailabilityStorage {
    pool: DbPool,
}

impl PgAvailabilityStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityStorage for PgAvailabilityStorage {
    async fn list(&self) -> Result<Vec<Availability>> {
        let rows = availability::list_availabilities(&self.pool).await?;
        Ok(rows.into_iter().map(Availability::from).collect())
    }

    async fn upsert(&self, block: Availability) -> Result<Availability> {
        let row =
            availability::upsert_availability(&self.pool, block.id, block.start_utc, block.end_utc)
                .await?;
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        availability::delete_availability(&self.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_test_pool;
    use availabilities_core::{
        application::AvailabilitiesApplication, config::AvailabilityConfig,
        editor::IntervalEditor, models::time_slot::TimeSlot,
    };
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tokio_test::assert_ok;

    #[tokio::test]
    #[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
    async fn test_upsert_list_delete() {
        let storage = PgAvailabilityStorage::new(create_test_pool().await);
        let start = Utc.with_ymd_and_hms(2030, 4, 1, 0, 0, 0).unwrap();

        let inserted = storage
            .upsert(Availability::new(start, start + Duration::days(1)))
            .await
            .unwrap();
        assert!(inserted.id.is_some());

        let updated = storage
            .upsert(inserted.with_start(start + Duration::hours(1)))
            .await
            .unwrap();
        assert_eq!(updated.id, inserted.id);

        let listed = storage.list().await.unwrap();
        assert_eq!(listed, vec![updated.clone()]);

        assert_ok!(storage.delete(updated.id.unwrap()).await);
        assert!(storage.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
    async fn test_seed_then_reserve_and_release() {
        let pool = create_test_pool().await;
        let config = AvailabilityConfig::default();

        assert!(crate::schema::seed_initial_availability(&pool, &config).await.unwrap());
        assert!(!crate::schema::seed_initial_availability(&pool, &config).await.unwrap());

        let storage = Arc::new(PgAvailabilityStorage::new(pool));
        let application = AvailabilitiesApplication::new(
            storage.clone(),
            Arc::new(IntervalEditor::new(config)),
        );

        let start = Utc.with_ymd_and_hms(2030, 4, 1, 9, 0, 0).unwrap();
        let slot = TimeSlot::with_minutes(start, 60).unwrap();
        let actual = application.reserve_availability(&slot).await.unwrap();
        assert_eq!(storage.list().await.unwrap().len(), 2);

        application.release_availability(&actual).await.unwrap();
        let listed = storage.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].start_utc, config.minimum_availability);
        assert_eq!(listed[0].end_utc, config.maximum_availability);
    }
}
