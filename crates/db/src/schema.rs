use availabilities_core::config::AvailabilityConfig;
use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create availabilities table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availabilities (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            start_utc TIMESTAMP WITH TIME ZONE NOT NULL,
            end_utc TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_availability_range CHECK (end_utc > start_utc)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_availabilities_start_utc ON availabilities(start_utc);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

/// Makes the whole configured range available when nothing is stored yet
///
/// Returns true if the initial block was inserted.
pub async fn seed_initial_availability(
    pool: &Pool<Postgres>,
    config: &AvailabilityConfig,
) -> Result<bool> {
    let inserted = sqlx::query(
        r#"
        INSERT INTO availabilities (id, start_utc, end_utc)
        SELECT gen_random_uuid(), $1, $2
        WHERE NOT EXISTS (SELECT 1 FROM availabilities)
        "#,
    )
    .bind(config.minimum_availability)
    .bind(config.maximum_availability)
    .execute(pool)
    .await?
    .rows_affected()
        > 0;

    if inserted {
        info!(
            start = %config.minimum_availability,
            end = %config.maximum_availability,
            "Seeded initial availability"
        );
    }

    Ok(inserted)
}
