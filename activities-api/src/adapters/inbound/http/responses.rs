//! HTTP response types for activity endpoints.
//!
//! These types serialize to the JSON format expected by the frontend.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::models::{ActivityWithParticipants, Registration};

/// One entry of the activity listing, keyed by name in [`ActivitiesResponse`].
#[derive(Debug, Serialize, PartialEq)]
pub struct ActivityResponse {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl From<ActivityWithParticipants> for ActivityResponse {
    fn from(value: ActivityWithParticipants) -> Self {
        Self {
            description: value.activity.description,
            schedule: value.activity.schedule,
            max_participants: value.activity.max_participants,
            participants: value
                .participants
                .into_iter()
                .map(|email| email.into_inner())
                .collect(),
        }
    }
}

/// Activity listing as a JSON object; keys serialize in name order.
pub type ActivitiesResponse = BTreeMap<String, ActivityResponse>;

pub fn activities_response(activities: Vec<ActivityWithParticipants>) -> ActivitiesResponse {
    activities
        .into_iter()
        .map(|activity| (activity.activity.name.clone(), activity.into()))
        .collect()
}

/// Confirmation returned by signup and unregister.
#[derive(Debug, Serialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn signed_up(registration: &Registration) -> Self {
        Self {
            message: format!(
                "Signed up {} for {}",
                registration.email, registration.activity_name
            ),
        }
    }

    pub fn unregistered(registration: &Registration) -> Self {
        Self {
            message: format!(
                "Unregistered {} from {}",
                registration.email, registration.activity_name
            ),
        }
    }
}
