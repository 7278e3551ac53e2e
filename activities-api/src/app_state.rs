use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{adapters::outbound::sqlite::SqliteActivityStore, domain::services::ActivityServiceImpl};

pub type ActivityServiceHandle = Arc<ActivityServiceImpl<SqliteActivityStore>>;

/// Process-wide state, built once before serving and cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub activity_service: ActivityServiceHandle,
}

impl AppState {
    pub fn new(db_pool: SqlitePool) -> Self {
        let store = Arc::new(SqliteActivityStore::new(db_pool.clone()));

        Self {
            db_pool,
            activity_service: Arc::new(ActivityServiceImpl::new(store)),
        }
    }

    /// Close every pooled connection; called once after the server stops.
    pub async fn shutdown(&self) {
        self.db_pool.close().await;
    }
}
