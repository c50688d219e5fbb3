use std::path::Path;

use const_format::concatcp;
use sqlx::{Executor, Pool, Sqlite, SqlitePool, query, query_as, sqlite::SqliteConnectOptions};

use crate::DataManagerError;

use super::constants::*;

/// Key -> JSON-string record store backing favorites, theme, map type and
/// achievement flags.
#[derive(Clone)]
pub struct SettingsDatabase {
    pool: Pool<Sqlite>,
}

impl SettingsDatabase {
    pub async fn connect(path: &Path) -> Result<Self, DataManagerError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|_| DataManagerError::Database("Failed to connect to database".to_string()))?;

        let db = Self { pool };

        db.init().await?;

        Ok(db)
    }

    async fn init(&self) -> Result<(), DataManagerError> {
        self.pool
            .execute(concatcp!(
                "CREATE TABLE IF NOT EXISTS ", SETTINGS_TABLE_NAME, "(",
                    KEY,   " TEXT PRIMARY KEY,",
                    VALUE, " TEXT NOT NULL)"
            ))
            .await
            .map_err(|_| DataManagerError::Database("Failed to create settings table".to_string()))
            .map(|_| ())
    }

    pub async fn get_value(&self, key: &str) -> Result<Option<String>, DataManagerError> {
        query_as::<_, (String,)>(concatcp!(
            "SELECT ", VALUE, " FROM ", SETTINGS_TABLE_NAME, " WHERE ", KEY, " = ?1"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| DataManagerError::Database(format!("Failed to read setting {key}")))
        .map(|row| row.map(|row| row.0))
    }

    pub async fn set_value(&self, key: &str, value: &str) -> Result<(), DataManagerError> {
        query(concatcp!(
            "INSERT INTO ", SETTINGS_TABLE_NAME, "(", KEY, ", ", VALUE, ")
            VALUES (?1, ?2) ON CONFLICT(", KEY, ") DO UPDATE SET ", VALUE, " = ?2"
        ))
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|_| DataManagerError::Database(format!("Failed to write setting {key}")))
        .map(|_| ())
    }

    pub async fn delete_value(&self, key: &str) -> Result<(), DataManagerError> {
        query(concatcp!(
            "DELETE FROM ", SETTINGS_TABLE_NAME, " WHERE ", KEY, " = ?1"
        ))
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(|_| DataManagerError::Database(format!("Failed to delete setting {key}")))
        .map(|_| ())
    }
}
