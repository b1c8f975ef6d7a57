//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `UserDirectoryService` port from the `core` crate. It handles all
//! interactions with the PostgreSQL database using `sqlx`, and republishes a
//! full user-list snapshot on a watch channel after every mutation so the
//! admin surface gets realtime push updates.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use futures::StreamExt;
use sqlx::{FromRow, PgPool};
use std::future::Future;
use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

use archstudio_core::domain::{GlobalSettings, UserRecord};
use archstudio_core::ports::{PortError, PortResult, UserDirectoryService, UserSnapshots};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `UserDirectoryService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
    users_tx: watch::Sender<Vec<UserRecord>>,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        let (users_tx, _) = watch::channel(Vec::new());
        Self { pool, users_tx }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    async fn fetch_users(&self) -> PortResult<Vec<UserRecord>> {
        let records = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, is_active, expiry_date, created_at, daily_quota, usage_count, last_usage_date \
             FROM users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(UserRow::to_domain).collect())
    }

    /// Pushes a fresh snapshot to every subscriber. Send failures just mean
    /// nobody is listening.
    async fn publish_snapshot(&self) -> PortResult<()> {
        let users = self.fetch_users().await?;
        let _ = self.users_tx.send(users);
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password: String,
    is_active: bool,
    expiry_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    daily_quota: i32,
    usage_count: i32,
    last_usage_date: NaiveDate,
}

impl UserRow {
    fn to_domain(self) -> UserRecord {
        UserRecord {
            id: self.id,
            username: self.username,
            password: self.password,
            is_active: self.is_active,
            expiry_date: self.expiry_date,
            created_at: self.created_at,
            daily_quota: self.daily_quota.max(0) as u32,
            usage_count: self.usage_count.max(0) as u32,
            last_usage_date: self.last_usage_date,
        }
    }
}

#[derive(FromRow)]
struct SettingsRow {
    gemini_api_key: String,
    updated_at: DateTime<Utc>,
}

impl SettingsRow {
    fn to_domain(self) -> GlobalSettings {
        GlobalSettings {
            gemini_api_key: self.gemini_api_key,
            updated_at: self.updated_at,
        }
    }
}

//=========================================================================================
// `UserDirectoryService` Trait Implementation
//=========================================================================================

#[async_trait]
impl UserDirectoryService for DbAdapter {
    async fn create_user(
        &self,
        username: &str,
        password: &str,
        daily_quota: u32,
        duration_days: i64,
    ) -> PortResult<UserRecord> {
        let expiry_date = Utc::now() + Duration::days(duration_days);
        let today = Utc::now().date_naive();

        let record = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, username, password, is_active, expiry_date, created_at, daily_quota, usage_count, last_usage_date) \
             VALUES ($1, $2, $3, TRUE, $4, now(), $5, 0, $6) \
             RETURNING id, username, password, is_active, expiry_date, created_at, daily_quota, usage_count, last_usage_date",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password)
        .bind(expiry_date)
        .bind(daily_quota as i32)
        .bind(today)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        self.publish_snapshot().await?;
        Ok(record.to_domain())
    }

    async fn list_users(&self) -> PortResult<Vec<UserRecord>> {
        self.fetch_users().await
    }

    async fn get_user_by_id(&self, id: Uuid) -> PortResult<UserRecord> {
        let record = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, is_active, expiry_date, created_at, daily_quota, usage_count, last_usage_date \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("User {} not found", id)),
            _ => PortError::Unexpected(e.to_string()),
        })?;
        Ok(record.to_domain())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> PortResult<()> {
        sqlx::query("UPDATE users SET is_active = $1 WHERE id = $2")
            .bind(active)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.publish_snapshot().await
    }

    async fn delete_user(&self, id: Uuid) -> PortResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.publish_snapshot().await
    }

    async fn update_password(&self, id: Uuid, password: &str) -> PortResult<()> {
        sqlx::query("UPDATE users SET password = $1 WHERE id = $2")
            .bind(password)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.publish_snapshot().await
    }

    async fn update_quota(&self, id: Uuid, daily_quota: u32) -> PortResult<()> {
        sqlx::query("UPDATE users SET daily_quota = $1 WHERE id = $2")
            .bind(daily_quota as i32)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.publish_snapshot().await
    }

    async fn update_expiry(&self, id: Uuid, expiry_date: DateTime<Utc>) -> PortResult<()> {
        sqlx::query("UPDATE users SET expiry_date = $1 WHERE id = $2")
            .bind(expiry_date)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.publish_snapshot().await
    }

    async fn write_usage(
        &self,
        id: Uuid,
        usage_count: u32,
        last_usage_date: NaiveDate,
    ) -> PortResult<()> {
        sqlx::query("UPDATE users SET usage_count = $1, last_usage_date = $2 WHERE id = $3")
            .bind(usage_count as i32)
            .bind(last_usage_date)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.publish_snapshot().await
    }

    async fn get_global_settings(&self) -> PortResult<Option<GlobalSettings>> {
        let record = sqlx::query_as::<_, SettingsRow>(
            "SELECT gemini_api_key, updated_at FROM settings WHERE id = 'global'",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(record.map(SettingsRow::to_domain))
    }

    async fn upsert_global_api_key(&self, api_key: &str) -> PortResult<GlobalSettings> {
        let record = sqlx::query_as::<_, SettingsRow>(
            "INSERT INTO settings (id, gemini_api_key, updated_at) VALUES ('global', $1, now()) \
             ON CONFLICT (id) DO UPDATE SET gemini_api_key = EXCLUDED.gemini_api_key, updated_at = now() \
             RETURNING gemini_api_key, updated_at",
        )
        .bind(api_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(record.to_domain())
    }

    fn subscribe_users(&self) -> UserSnapshots {
        let rx = self.users_tx.subscribe();
        let adapter = self.clone();
        snapshot_stream(rx, async move { adapter.fetch_users().await })
    }
}

/// Builds the snapshot stream for one subscriber. The watch channel starts
/// empty and is only refilled on mutation, so the first snapshot is fetched
/// directly; later ones come off the channel.
fn snapshot_stream<F>(mut rx: watch::Receiver<Vec<UserRecord>>, fetch_initial: F) -> UserSnapshots
where
    F: Future<Output = PortResult<Vec<UserRecord>>> + Send + 'static,
{
    let stream = async_stream::stream! {
        let initial = match fetch_initial.await {
            Ok(users) => users,
            Err(e) => {
                warn!("Falling back to the cached user snapshot: {}", e);
                rx.borrow_and_update().clone()
            }
        };
        // Mark the seeded channel value as seen.
        rx.borrow_and_update();
        yield initial;
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            yield snapshot;
        }
    };
    stream.boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn user(username: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password: "secret".to_string(),
            is_active: true,
            expiry_date: Utc::now() + Duration::days(30),
            created_at: Utc::now(),
            daily_quota: 10,
            usage_count: 0,
            last_usage_date: Utc::now().date_naive(),
        }
    }

    #[tokio::test]
    async fn subscription_starts_with_a_fresh_snapshot() {
        let (tx, rx) = watch::channel(Vec::new());
        let seeded = vec![user("alice")];
        let initial = seeded.clone();
        let mut stream = snapshot_stream(rx, async move { Ok(initial) });

        let first = stream.next().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].username, "alice");

        tx.send(vec![user("alice"), user("bob")]).unwrap();
        let second = stream.next().await.unwrap();
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn failed_initial_fetch_falls_back_to_the_cached_snapshot() {
        let (_tx, rx) = watch::channel(vec![user("cached")]);
        let mut stream = snapshot_stream(rx, async move {
            Err(PortError::Unexpected("connection lost".to_string()))
        });

        let first = stream.next().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].username, "cached");
    }
}
