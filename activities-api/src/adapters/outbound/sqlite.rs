//! SQLite implementation of the ActivityStore port.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{migrate::MigrateError, sqlite::SqlitePoolOptions, Sqlite, SqlitePool, Transaction};

use crate::{
    config::DatabaseSettings,
    domain::{
        models::{Activity, ActivityId, ActivityWithParticipants, NewActivity, SignupId},
        ports::outbound::{ActivitySession, ActivityStore, StoreError},
        ParticipantEmail,
    },
};

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::UniqueViolation,
            _ => Self::Backend(err.to_string()),
        }
    }
}

/// Open a connection pool for the configured database.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let options = settings.connect_options()?;

    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
}

/// Create or upgrade the schema.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[derive(Clone)]
pub struct SqliteActivityStore {
    pool: SqlitePool,
}

impl SqliteActivityStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for SqliteActivityStore {
    type Session = SqliteSession;

    async fn session(&self) -> Result<Self::Session, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(SqliteSession { tx })
    }

    async fn write_session(&self) -> Result<Self::Session, StoreError> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(SqliteSession { tx })
    }
}

/// One transaction on a pooled connection.
///
/// Dropping it without committing rolls the transaction back and hands the
/// connection back to the pool.
pub struct SqliteSession {
    tx: Transaction<'static, Sqlite>,
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: i64,
    name: String,
    description: String,
    schedule: String,
    max_participants: u32,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: ActivityId::new(row.id),
            name: row.name,
            description: row.description,
            schedule: row.schedule,
            max_participants: row.max_participants,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    activity_id: i64,
    email: String,
}

fn stored_email(email: String) -> Result<ParticipantEmail, StoreError> {
    ParticipantEmail::try_from(email)
        .map_err(|err| StoreError::backend(format!("invalid stored email: {err}")))
}

fn to_count(count: i64) -> Result<u32, StoreError> {
    u32::try_from(count).map_err(|_| StoreError::backend(format!("count out of range: {count}")))
}

#[async_trait]
impl ActivitySession for SqliteSession {
    async fn list_activities(&mut self) -> Result<Vec<ActivityWithParticipants>, StoreError> {
        let activities = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, name, description, schedule, max_participants
            FROM activities
            ORDER BY name
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        let rows = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT activity_id, email
            FROM activity_participants
            ORDER BY activity_id, id
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        let mut participants: HashMap<i64, Vec<ParticipantEmail>> = HashMap::new();
        for row in rows {
            participants
                .entry(row.activity_id)
                .or_default()
                .push(stored_email(row.email)?);
        }

        Ok(activities
            .into_iter()
            .map(|row| {
                let participants = participants.remove(&row.id).unwrap_or_default();
                ActivityWithParticipants {
                    activity: row.into(),
                    participants,
                }
            })
            .collect())
    }

    async fn find_activity(&mut self, name: &str) -> Result<Option<Activity>, StoreError> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, name, description, schedule, max_participants
            FROM activities
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Activity::from))
    }

    async fn find_signup(
        &mut self,
        activity_id: ActivityId,
        email: &ParticipantEmail,
    ) -> Result<Option<SignupId>, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM activity_participants
            WHERE activity_id = ? AND email = ?
            "#,
        )
        .bind(activity_id.as_i64())
        .bind(email.as_str())
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(id.map(SignupId::new))
    }

    async fn count_signups(&mut self, activity_id: ActivityId) -> Result<u32, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM activity_participants WHERE activity_id = ?",
        )
        .bind(activity_id.as_i64())
        .fetch_one(&mut *self.tx)
        .await?;

        to_count(count)
    }

    async fn count_activities(&mut self) -> Result<u32, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activities")
            .fetch_one(&mut *self.tx)
            .await?;

        to_count(count)
    }

    async fn insert_activity(&mut self, activity: &NewActivity) -> Result<ActivityId, StoreError> {
        let id = sqlx::query(
            r#"
            INSERT INTO activities (name, description, schedule, max_participants)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&activity.name)
        .bind(&activity.description)
        .bind(&activity.schedule)
        .bind(activity.max_participants)
        .execute(&mut *self.tx)
        .await?
        .last_insert_rowid();

        let activity_id = ActivityId::new(id);
        for email in &activity.participants {
            self.insert_signup(activity_id, email).await?;
        }

        Ok(activity_id)
    }

    async fn insert_signup(
        &mut self,
        activity_id: ActivityId,
        email: &ParticipantEmail,
    ) -> Result<SignupId, StoreError> {
        let id = sqlx::query(
            r#"
            INSERT INTO activity_participants (activity_id, email)
            VALUES (?, ?)
            "#,
        )
        .bind(activity_id.as_i64())
        .bind(email.as_str())
        .execute(&mut *self.tx)
        .await?
        .last_insert_rowid();

        Ok(SignupId::new(id))
    }

    async fn delete_signup(&mut self, signup_id: SignupId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM activity_participants WHERE id = ?")
            .bind(signup_id.as_i64())
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn delete_activity(&mut self, activity_id: ActivityId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(activity_id.as_i64())
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let settings = DatabaseSettings {
        url: format!("sqlite://{}", dir.path().join("activities.db").display()),
        max_connections: 5,
    };

    let pool = connect(&settings).await.expect("failed to connect");
    migrate(&pool).await.expect("failed to migrate");

    (dir, pool)
}

#[cfg(test)]
pub(crate) async fn seeded_test_pool() -> (tempfile::TempDir, SqlitePool) {
    use crate::domain::seed::{default_catalog, seed_if_empty};

    let (dir, pool) = test_pool().await;
    let catalog = default_catalog().expect("invalid catalog");
    seed_if_empty(&SqliteActivityStore::new(pool.clone()), &catalog)
        .await
        .expect("failed to seed");

    (dir, pool)
}

#[cfg(test)]
pub(crate) async fn test_store() -> (tempfile::TempDir, SqliteActivityStore) {
    let (dir, pool) = test_pool().await;
    (dir, SqliteActivityStore::new(pool))
}

#[cfg(test)]
pub(crate) async fn seeded_test_store() -> (tempfile::TempDir, SqliteActivityStore) {
    let (dir, pool) = seeded_test_pool().await;
    (dir, SqliteActivityStore::new(pool))
}
