use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{ClientStateEntry, ClientStateRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl ClientStateRepository for SqliteRepository {
    async fn get_entry(&self, key: &str) -> Result<Option<ClientStateEntry>, StorageError> {
        let row = sqlx::query("SELECT value, updated_at FROM client_state WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row.try_get("value").map_err(ser)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(ser)?;
        Ok(Some(ClientStateEntry { value, updated_at }))
    }

    async fn put_entry(&self, key: &str, entry: &ClientStateEntry) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO client_state (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(&entry.value)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn remove_entry(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM client_state WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
