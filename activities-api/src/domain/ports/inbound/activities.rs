use async_trait::async_trait;

use crate::domain::{
    models::{ActivityWithParticipants, Registration},
    ActivityError,
};

/// Inbound port for activity operations.
///
/// This trait defines the use cases that HTTP handlers can invoke.
/// Emails are passed raw; the service normalizes them.
#[async_trait]
pub trait ActivityService: Send + Sync + 'static {
    /// All activities ordered by name, with their participants.
    async fn list(&self) -> Result<Vec<ActivityWithParticipants>, ActivityError>;

    /// Register a student for an activity.
    async fn signup(&self, activity_name: &str, email: &str)
        -> Result<Registration, ActivityError>;

    /// Remove a student's registration from an activity.
    async fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Registration, ActivityError>;
}
