use crate::models::DbAvailability;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_availabilities(pool: &Pool<Postgres>) -> Result<Vec<DbAvailability>> {
    let availabilities = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT id, start_utc, end_utc, created_at, updated_at
        FROM availabilities
        ORDER BY start_utc ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(availabilities)
}

/// Inserts the block, or replaces the bounds of the block stored under `id`.
/// A new id is generated when `id` is `None`.
pub async fn upsert_availability(
    pool: &Pool<Postgres>,
    id: Option<Uuid>,
    start_utc: DateTime<Utc>,
    end_utc: DateTime<Utc>,
) -> Result<DbAvailability> {
    let id = id.unwrap_or_else(Uuid::new_v4);
    let now = Utc::now();

    tracing::debug!(
        "Upserting availability: id={}, start={}, end={}",
        id, start_utc, end_utc
    );

    let availability = sqlx::query_as::<_, DbAvailability>(
        r#"
        INSERT INTO availabilities (id, start_utc, end_utc, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        ON CONFLICT (id)
        DO UPDATE SET start_utc = $2, end_utc = $3, updated_at = $4
        RETURNING id, start_utc, end_utc, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(start_utc)
    .bind(end_utc)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(availability)
}

pub async fn delete_availability(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM availabilities
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        tracing::debug!("Availability not found for delete: id={}", id);
    }

    Ok(())
}
