//! `PostgreSQL` implementation of the `EventStore` trait.

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use convene_core::error::DomainError;
use convene_core::identity::Identity;
use convene_core::store::{EventRecord, EventStore, NewEventRecord, Participant};

use crate::schema;

const TIME_FORMAT: &str = "%H:%M";

const SELECT_COLUMNS: &str =
    "SELECT id, name, date, owner_id, times_allowed, created_at, updated_at FROM events";

/// PostgreSQL-backed event store.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    /// Creates a new `PgEventStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the events tables and indexes if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` when the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(schema::CREATE_SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }
}

fn infra(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

fn encode_times(times: &[NaiveTime]) -> serde_json::Value {
    serde_json::Value::Array(
        times
            .iter()
            .map(|time| serde_json::Value::String(time.format(TIME_FORMAT).to_string()))
            .collect(),
    )
}

fn decode_times(value: &serde_json::Value) -> Result<Vec<NaiveTime>, DomainError> {
    let entries = value.as_array().ok_or_else(|| {
        DomainError::Infrastructure("times_allowed column is not a JSON array".into())
    })?;
    entries
        .iter()
        .map(|entry| {
            let text = entry.as_str().ok_or_else(|| {
                DomainError::Infrastructure(format!("non-string time slot: {entry}"))
            })?;
            NaiveTime::parse_from_str(text, TIME_FORMAT)
                .map_err(|err| DomainError::Infrastructure(format!("bad time slot {text:?}: {err}")))
        })
        .collect()
}

fn row_to_record(row: &PgRow) -> Result<EventRecord, DomainError> {
    let times: serde_json::Value = row.try_get("times_allowed").map_err(infra)?;
    Ok(EventRecord {
        id: row.try_get("id").map_err(infra)?,
        name: row.try_get("name").map_err(infra)?,
        date: row.try_get("date").map_err(infra)?,
        owner: Identity(row.try_get("owner_id").map_err(infra)?),
        times_allowed: decode_times(&times)?,
        created_at: row.try_get("created_at").map_err(infra)?,
        updated_at: row.try_get("updated_at").map_err(infra)?,
    })
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<EventRecord>, DomainError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(row_to_record).transpose()
    }

    async fn find_all(&self) -> Result<Vec<EventRecord>, DomainError> {
        let rows = sqlx::query(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        rows.iter().map(row_to_record).collect()
    }

    async fn insert(&self, record: NewEventRecord) -> Result<EventRecord, DomainError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO events (id, name, date, owner_id, times_allowed, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(&record.name)
        .bind(record.date)
        .bind(record.owner.0)
        .bind(encode_times(&record.times_allowed))
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;

        Ok(EventRecord {
            id,
            name: record.name,
            date: record.date,
            owner: record.owner,
            times_allowed: record.times_allowed,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    async fn update(&self, record: &EventRecord) -> Result<(), DomainError> {
        // owner_id is intentionally absent from the SET list.
        let result = sqlx::query(
            "UPDATE events SET name = $2, date = $3, times_allowed = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(record.date)
        .bind(encode_times(&record.times_allowed))
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(record.id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn participants_of(&self, event_id: Uuid) -> Result<Vec<Participant>, DomainError> {
        let rows = sqlx::query(
            "SELECT user_id, name FROM event_participants WHERE event_id = $1 ORDER BY name",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        rows.iter()
            .map(|row| {
                Ok(Participant {
                    user_id: row.try_get("user_id").map_err(infra)?,
                    name: row.try_get("name").map_err(infra)?,
                })
            })
            .collect()
    }
}
