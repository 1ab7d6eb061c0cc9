use availabilities_core::models::availability::Availability;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailability {
    pub id: Uuid,
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbAvailability> for Availability {
    fn from(row: DbAvailability) -> Self {
        Availability {
            id: Some(row.id),
            start_utc: row.start_utc,
            end_utc: row.end_utc,
        }
    }
}
