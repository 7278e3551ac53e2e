use super::ActivityId;
use crate::domain::ParticipantEmail;

/// A stored extracurricular activity, without its participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
}

impl Activity {
    pub fn has_room_for(&self, current_count: u32) -> bool {
        current_count < self.max_participants
    }
}

/// An activity together with its registered participants, in signup order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityWithParticipants {
    pub activity: Activity,
    pub participants: Vec<ParticipantEmail>,
}

/// Activity data used when populating an empty store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<ParticipantEmail>,
}

/// A confirmed registration, as returned by the signup and unregister operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub activity_name: String,
    pub email: ParticipantEmail,
}

impl Registration {
    pub fn new(activity_name: impl Into<String>, email: ParticipantEmail) -> Self {
        Self {
            activity_name: activity_name.into(),
            email,
        }
    }
}
