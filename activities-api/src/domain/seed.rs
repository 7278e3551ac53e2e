//! Initial activity catalog, loaded once into an empty store.

use thiserror::Error;

use super::{
    models::NewActivity,
    ports::outbound::{ActivitySession, ActivityStore, StoreError},
    EmailError, ParticipantEmail,
};

struct CatalogEntry {
    name: &'static str,
    description: &'static str,
    schedule: &'static str,
    max_participants: u32,
    participants: &'static [&'static str],
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    CatalogEntry {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    CatalogEntry {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        max_participants: 30,
        participants: &["john@mergington.edu", "olivia@mergington.edu"],
    },
    CatalogEntry {
        name: "Soccer Team",
        description: "Join the school soccer team and compete in matches",
        schedule: "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        max_participants: 22,
        participants: &["liam@mergington.edu", "noah@mergington.edu"],
    },
    CatalogEntry {
        name: "Basketball Team",
        description: "Practice and play basketball with the school team",
        schedule: "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
        max_participants: 15,
        participants: &["ava@mergington.edu", "mia@mergington.edu"],
    },
    CatalogEntry {
        name: "Art Club",
        description: "Explore your creativity through painting and drawing",
        schedule: "Thursdays, 3:30 PM - 5:00 PM",
        max_participants: 15,
        participants: &["amelia@mergington.edu", "harper@mergington.edu"],
    },
    CatalogEntry {
        name: "Drama Club",
        description: "Act, direct, and produce plays and performances",
        schedule: "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
        max_participants: 20,
        participants: &["ella@mergington.edu", "scarlett@mergington.edu"],
    },
    CatalogEntry {
        name: "Math Club",
        description: "Solve challenging problems and participate in math competitions",
        schedule: "Tuesdays, 3:30 PM - 4:30 PM",
        max_participants: 10,
        participants: &["james@mergington.edu", "benjamin@mergington.edu"],
    },
    CatalogEntry {
        name: "Debate Team",
        description: "Develop public speaking and argumentation skills",
        schedule: "Fridays, 4:00 PM - 5:30 PM",
        max_participants: 12,
        participants: &["charlotte@mergington.edu", "henry@mergington.edu"],
    },
];

#[derive(Debug, Error, PartialEq)]
pub enum SeedError {
    #[error("seed activity '{name}' has {participants} participants but room for {max_participants}")]
    OverCapacity {
        name: String,
        participants: usize,
        max_participants: u32,
    },
    #[error("seed activity '{name}' has an invalid participant: {source}")]
    InvalidParticipant { name: String, source: EmailError },
    #[error("failed to store seed data: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded { activities: usize, participants: usize },
    AlreadyPresent,
}

/// The built-in catalog, with participant emails normalized.
pub fn default_catalog() -> Result<Vec<NewActivity>, SeedError> {
    CATALOG
        .iter()
        .map(|entry| {
            let participants = entry
                .participants
                .iter()
                .map(|email| ParticipantEmail::try_from(*email))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| SeedError::InvalidParticipant {
                    name: entry.name.to_string(),
                    source,
                })?;

            Ok(NewActivity {
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                schedule: entry.schedule.to_string(),
                max_participants: entry.max_participants,
                participants,
            })
        })
        .collect()
}

/// Rejects a catalog in which any activity starts out over capacity.
pub fn validate_catalog(catalog: &[NewActivity]) -> Result<(), SeedError> {
    match catalog
        .iter()
        .find(|activity| activity.participants.len() > activity.max_participants as usize)
    {
        Some(activity) => Err(SeedError::OverCapacity {
            name: activity.name.clone(),
            participants: activity.participants.len(),
            max_participants: activity.max_participants,
        }),
        None => Ok(()),
    }
}

/// Populates the store with `catalog` if it holds no activities yet.
///
/// The whole catalog is written in one session: either every activity and
/// participant is committed, or nothing is.
pub async fn seed_if_empty<S: ActivityStore>(
    store: &S,
    catalog: &[NewActivity],
) -> Result<SeedOutcome, SeedError> {
    validate_catalog(catalog)?;

    let mut session = store.write_session().await?;
    if session.count_activities().await? > 0 {
        tracing::debug!("Activities already present, skipping seed");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let mut participants = 0;
    for activity in catalog {
        session.insert_activity(activity).await?;
        participants += activity.participants.len();
    }
    session.commit().await?;

    tracing::info!(
        activities = catalog.len(),
        participants,
        "Seeded activity catalog"
    );

    Ok(SeedOutcome::Seeded {
        activities: catalog.len(),
        participants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::{sqlite::test_store, MockActivityStore};

    #[test]
    fn default_catalog_has_nine_valid_activities() {
        let catalog = default_catalog().unwrap();
        assert_eq!(catalog.len(), 9);
        assert!(validate_catalog(&catalog).is_ok());
        assert!(catalog.iter().all(|a| a.participants.len() == 2));
    }

    #[test]
    fn over_capacity_entry_is_rejected() {
        let mut catalog = default_catalog().unwrap();
        catalog[0].max_participants = 1;

        assert_eq!(
            validate_catalog(&catalog).unwrap_err(),
            SeedError::OverCapacity {
                name: "Chess Club".to_string(),
                participants: 2,
                max_participants: 1,
            }
        );
    }

    #[tokio::test]
    async fn seeds_empty_store() {
        let (_dir, store) = test_store().await;
        let catalog = default_catalog().unwrap();

        let outcome = seed_if_empty(&store, &catalog).await.unwrap();

        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                activities: 9,
                participants: 18
            }
        );
        let mut session = store.session().await.unwrap();
        assert_eq!(session.count_activities().await.unwrap(), 9);
    }

    #[tokio::test]
    async fn second_seed_is_a_no_op() {
        let (_dir, store) = test_store().await;
        let catalog = default_catalog().unwrap();

        seed_if_empty(&store, &catalog).await.unwrap();
        let outcome = seed_if_empty(&store, &catalog).await.unwrap();

        assert_eq!(outcome, SeedOutcome::AlreadyPresent);
        let mut session = store.session().await.unwrap();
        let activities = session.list_activities().await.unwrap();
        assert_eq!(activities.len(), 9);
        assert!(activities.iter().all(|a| a.participants.len() == 2));
    }

    #[tokio::test]
    async fn over_capacity_catalog_leaves_store_empty() {
        let (_dir, store) = test_store().await;
        let mut catalog = default_catalog().unwrap();
        catalog[8].max_participants = 1;

        let err = seed_if_empty(&store, &catalog).await.unwrap_err();

        assert!(matches!(err, SeedError::OverCapacity { .. }));
        let mut session = store.session().await.unwrap();
        assert_eq!(session.count_activities().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failing_commit_leaves_store_empty() {
        let store = MockActivityStore::new().failing_commits();
        let catalog = default_catalog().unwrap();

        let err = seed_if_empty(&store, &catalog).await.unwrap_err();

        assert!(matches!(err, SeedError::Store(StoreError::Backend(_))));
        assert_eq!(store.activity_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_names_roll_back_whole_catalog() {
        let (_dir, store) = test_store().await;
        let mut catalog = default_catalog().unwrap();
        catalog[1].name = catalog[0].name.clone();

        let err = seed_if_empty(&store, &catalog).await.unwrap_err();

        assert!(matches!(err, SeedError::Store(_)));
        let mut session = store.session().await.unwrap();
        assert_eq!(session.count_activities().await.unwrap(), 0);
    }
}
