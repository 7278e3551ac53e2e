use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{ActivityWithParticipants, Registration},
    ports::{
        inbound::ActivityService,
        outbound::{ActivitySession, ActivityStore, StoreError},
    },
    ActivityError, Operation, ParticipantEmail,
};

/// Implementation of the ActivityService inbound port.
///
/// Every call opens its own store session and either commits it or drops it,
/// which rolls back anything written so far. The duplicate and capacity
/// checks run before the insert; the store's unique constraint still has the
/// final word when two requests race past the check.
pub struct ActivityServiceImpl<S> {
    store: Arc<S>,
}

impl<S> ActivityServiceImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: ActivityStore> ActivityService for ActivityServiceImpl<S> {
    async fn list(&self) -> Result<Vec<ActivityWithParticipants>, ActivityError> {
        let mut session = self.session(Operation::List).await?;

        session
            .list_activities()
            .await
            .map_err(store_failure(Operation::List))
    }

    async fn signup(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Registration, ActivityError> {
        let email = ParticipantEmail::try_from(email)?;
        let on_error = store_failure(Operation::Signup);

        let mut session = self.write_session(Operation::Signup).await?;
        let activity = session
            .find_activity(activity_name)
            .await
            .map_err(on_error)?
            .ok_or(ActivityError::NotFound)?;

        if session
            .find_signup(activity.id, &email)
            .await
            .map_err(on_error)?
            .is_some()
        {
            return Err(ActivityError::Conflict);
        }

        let count = session
            .count_signups(activity.id)
            .await
            .map_err(on_error)?;
        if !activity.has_room_for(count) {
            tracing::debug!(activity = %activity.name, count, "Activity is full");
            return Err(ActivityError::CapacityExceeded);
        }

        session
            .insert_signup(activity.id, &email)
            .await
            .map_err(on_error)?;
        session.commit().await.map_err(on_error)?;

        tracing::info!(activity = %activity.name, email = %email, "Signed up participant");
        Ok(Registration::new(activity.name, email))
    }

    async fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Registration, ActivityError> {
        let email = ParticipantEmail::try_from(email)?;
        let on_error = store_failure(Operation::Unregister);

        let mut session = self.write_session(Operation::Unregister).await?;
        let activity = session
            .find_activity(activity_name)
            .await
            .map_err(on_error)?
            .ok_or(ActivityError::NotFound)?;

        let signup_id = session
            .find_signup(activity.id, &email)
            .await
            .map_err(on_error)?
            .ok_or(ActivityError::NotRegistered)?;

        session.delete_signup(signup_id).await.map_err(on_error)?;
        session.commit().await.map_err(on_error)?;

        tracing::info!(activity = %activity.name, email = %email, "Unregistered participant");
        Ok(Registration::new(activity.name, email))
    }
}

impl<S: ActivityStore> ActivityServiceImpl<S> {
    async fn session(&self, operation: Operation) -> Result<S::Session, ActivityError> {
        self.store
            .session()
            .await
            .map_err(store_failure(operation))
    }

    async fn write_session(&self, operation: Operation) -> Result<S::Session, ActivityError> {
        self.store
            .write_session()
            .await
            .map_err(store_failure(operation))
    }
}

/// Maps a store error onto the service taxonomy.
///
/// A unique violation means another request registered the same pair first.
fn store_failure(operation: Operation) -> impl Fn(StoreError) -> ActivityError + Copy {
    move |err| match err {
        StoreError::UniqueViolation => ActivityError::Conflict,
        StoreError::Backend(message) => {
            tracing::error!(%operation, "Store operation failed: {}", message);
            ActivityError::Unavailable(operation)
        }
    }
}
