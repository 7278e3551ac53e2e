//! Activity store port (outbound).
//!
//! Defines the interface for persisting activities and their signups.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    models::{Activity, ActivityId, ActivityWithParticipants, NewActivity, SignupId},
    ParticipantEmail,
};

/// Errors raised by a store implementation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// The (activity, email) uniqueness constraint rejected a write.
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Outbound port handing out request-scoped sessions.
///
/// Each session is one atomic unit of work. Dropping a session without
/// calling [`ActivitySession::commit`] discards everything it wrote.
#[async_trait]
pub trait ActivityStore: Send + Sync + 'static {
    type Session: ActivitySession;

    /// Acquire a read session (connection plus open transaction).
    async fn session(&self) -> Result<Self::Session, StoreError>;

    /// Acquire a session that holds the store's write lock from the start.
    ///
    /// Concurrent writers queue behind each other instead of failing, and
    /// every check made inside the session sees all earlier commits.
    async fn write_session(&self) -> Result<Self::Session, StoreError>;
}

/// A single unit of work against the store.
#[async_trait]
pub trait ActivitySession: Send {
    /// All activities ordered by name, each with participants in signup order.
    async fn list_activities(&mut self) -> Result<Vec<ActivityWithParticipants>, StoreError>;

    async fn find_activity(&mut self, name: &str) -> Result<Option<Activity>, StoreError>;

    async fn find_signup(
        &mut self,
        activity_id: ActivityId,
        email: &ParticipantEmail,
    ) -> Result<Option<SignupId>, StoreError>;

    async fn count_signups(&mut self, activity_id: ActivityId) -> Result<u32, StoreError>;

    async fn count_activities(&mut self) -> Result<u32, StoreError>;

    /// Insert an activity and its initial participants.
    async fn insert_activity(&mut self, activity: &NewActivity) -> Result<ActivityId, StoreError>;

    /// Insert a signup.
    ///
    /// Fails with [`StoreError::UniqueViolation`] when the pair already exists.
    async fn insert_signup(
        &mut self,
        activity_id: ActivityId,
        email: &ParticipantEmail,
    ) -> Result<SignupId, StoreError>;

    async fn delete_signup(&mut self, signup_id: SignupId) -> Result<(), StoreError>;

    /// Delete an activity; its signups are removed with it.
    async fn delete_activity(&mut self, activity_id: ActivityId) -> Result<(), StoreError>;

    async fn commit(self) -> Result<(), StoreError>;
}
