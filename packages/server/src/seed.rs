use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use tracing::info;

use crate::catalog::{CatalogStore, NewActivity};

/// A catalog entry inserted on first startup.
pub struct SeedActivity {
    pub name: &'static str,
    pub description: &'static str,
    pub schedule: &'static str,
    pub max_participants: i32,
    pub participants: &'static [&'static str],
}

/// Activities seeded into an empty database.
pub const DEFAULT_ACTIVITIES: &[SeedActivity] = &[
    SeedActivity {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    SeedActivity {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    SeedActivity {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        max_participants: 30,
        participants: &["john@mergington.edu", "olivia@mergington.edu"],
    },
];

/// Seed the catalog with [`DEFAULT_ACTIVITIES`].
///
/// Does nothing if any activity already exists. Returns whether rows were
/// inserted.
pub async fn seed_activities(db: &DatabaseConnection) -> Result<bool, DbErr> {
    seed_with(db, DEFAULT_ACTIVITIES).await
}

/// Seed the catalog with `activities` in a single transaction, unless any
/// activity already exists.
pub async fn seed_with(db: &DatabaseConnection, activities: &[SeedActivity]) -> Result<bool, DbErr> {
    let txn = db.begin().await?;
    let store = CatalogStore::new(&txn);

    if store.has_any_activity().await? {
        return Ok(false);
    }

    let mut enrollments = 0u32;
    for seed in activities {
        let activity = store
            .create_activity(NewActivity {
                name: seed.name,
                description: seed.description,
                schedule: seed.schedule,
                max_participants: seed.max_participants,
            })
            .await?;

        for &email in seed.participants {
            let participant = store.find_or_create_participant(email).await?;
            store.add_enrollment(activity.id, participant.id).await?;
            enrollments += 1;
        }
    }

    txn.commit().await?;

    info!(
        activities = activities.len(),
        enrollments, "Seeded activity catalog"
    );
    Ok(true)
}
