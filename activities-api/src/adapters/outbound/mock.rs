//! In-memory ActivityStore used by tests.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::{
    models::{Activity, ActivityId, ActivityWithParticipants, NewActivity, SignupId},
    ports::outbound::{ActivitySession, ActivityStore, StoreError},
    ParticipantEmail,
};

#[derive(Debug, Clone, Default)]
struct State {
    next_id: i64,
    activities: Vec<Activity>,
    signups: Vec<(SignupId, ActivityId, ParticipantEmail)>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Mock store backed by a shared in-memory state.
///
/// Sessions work on a copy of the state and publish it on commit, so a
/// failed or dropped session leaves nothing behind.
#[derive(Clone, Default)]
pub struct MockActivityStore {
    state: Arc<RwLock<State>>,
    fail_sessions: bool,
    fail_commits: bool,
    hide_signups: bool,
}

impl MockActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add initial activities with their participants.
    pub fn with_activities(self, activities: Vec<NewActivity>) -> Self {
        {
            let mut state = self.state.write().unwrap();
            for new in activities {
                let id = ActivityId::new(state.next_id());
                for email in new.participants {
                    let signup_id = SignupId::new(state.next_id());
                    state.signups.push((signup_id, id, email));
                }
                state.activities.push(Activity {
                    id,
                    name: new.name,
                    description: new.description,
                    schedule: new.schedule,
                    max_participants: new.max_participants,
                });
            }
        }
        self
    }

    /// Refuse to open sessions.
    pub fn failing_sessions(mut self) -> Self {
        self.fail_sessions = true;
        self
    }

    /// Fail every commit with a backend error.
    pub fn failing_commits(mut self) -> Self {
        self.fail_commits = true;
        self
    }

    /// Make `find_signup` miss, as if another request inserted concurrently.
    pub fn hiding_existing_signups(mut self) -> Self {
        self.hide_signups = true;
        self
    }

    pub fn activity_count(&self) -> usize {
        self.state.read().unwrap().activities.len()
    }

    pub fn signup_count(&self) -> usize {
        self.state.read().unwrap().signups.len()
    }
}

#[async_trait]
impl ActivityStore for MockActivityStore {
    type Session = MockSession;

    async fn session(&self) -> Result<Self::Session, StoreError> {
        if self.fail_sessions {
            return Err(StoreError::backend("session refused"));
        }

        Ok(MockSession {
            working: self.state.read().unwrap().clone(),
            shared: self.state.clone(),
            fail_commit: self.fail_commits,
            hide_signups: self.hide_signups,
        })
    }

    async fn write_session(&self) -> Result<Self::Session, StoreError> {
        self.session().await
    }
}

pub struct MockSession {
    working: State,
    shared: Arc<RwLock<State>>,
    fail_commit: bool,
    hide_signups: bool,
}

#[async_trait]
impl ActivitySession for MockSession {
    async fn list_activities(&mut self) -> Result<Vec<ActivityWithParticipants>, StoreError> {
        let mut activities = self.working.activities.clone();
        activities.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(activities
            .into_iter()
            .map(|activity| {
                let participants = self
                    .working
                    .signups
                    .iter()
                    .filter(|(_, activity_id, _)| *activity_id == activity.id)
                    .map(|(_, _, email)| email.clone())
                    .collect();
                ActivityWithParticipants {
                    activity,
                    participants,
                }
            })
            .collect())
    }

    async fn find_activity(&mut self, name: &str) -> Result<Option<Activity>, StoreError> {
        Ok(self
            .working
            .activities
            .iter()
            .find(|a| a.name == name)
            .cloned())
    }

    async fn find_signup(
        &mut self,
        activity_id: ActivityId,
        email: &ParticipantEmail,
    ) -> Result<Option<SignupId>, StoreError> {
        if self.hide_signups {
            return Ok(None);
        }

        Ok(self
            .working
            .signups
            .iter()
            .find(|(_, a, e)| *a == activity_id && e == email)
            .map(|(id, _, _)| *id))
    }

    async fn count_signups(&mut self, activity_id: ActivityId) -> Result<u32, StoreError> {
        let count = self
            .working
            .signups
            .iter()
            .filter(|(_, a, _)| *a == activity_id)
            .count();
        Ok(count as u32)
    }

    async fn count_activities(&mut self) -> Result<u32, StoreError> {
        Ok(self.working.activities.len() as u32)
    }

    async fn insert_activity(&mut self, new: &NewActivity) -> Result<ActivityId, StoreError> {
        if self.working.activities.iter().any(|a| a.name == new.name) {
            return Err(StoreError::UniqueViolation);
        }

        let id = ActivityId::new(self.working.next_id());
        self.working.activities.push(Activity {
            id,
            name: new.name.clone(),
            description: new.description.clone(),
            schedule: new.schedule.clone(),
            max_participants: new.max_participants,
        });
        for email in &new.participants {
            self.insert_signup(id, email).await?;
        }

        Ok(id)
    }

    async fn insert_signup(
        &mut self,
        activity_id: ActivityId,
        email: &ParticipantEmail,
    ) -> Result<SignupId, StoreError> {
        if self
            .working
            .signups
            .iter()
            .any(|(_, a, e)| *a == activity_id && e == email)
        {
            return Err(StoreError::UniqueViolation);
        }

        let id = SignupId::new(self.working.next_id());
        self.working.signups.push((id, activity_id, email.clone()));
        Ok(id)
    }

    async fn delete_signup(&mut self, signup_id: SignupId) -> Result<(), StoreError> {
        self.working.signups.retain(|(id, _, _)| *id != signup_id);
        Ok(())
    }

    async fn delete_activity(&mut self, activity_id: ActivityId) -> Result<(), StoreError> {
        self.working.activities.retain(|a| a.id != activity_id);
        self.working.signups.retain(|(_, a, _)| *a != activity_id);
        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        if self.fail_commit {
            return Err(StoreError::backend("disk I/O error"));
        }

        *self.shared.write().unwrap() = self.working;
        Ok(())
    }
}
