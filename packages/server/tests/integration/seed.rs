use mergington_server::catalog::CatalogStore;
use mergington_server::seed::{self, DEFAULT_ACTIVITIES, SeedActivity};

use crate::common::TestApp;

#[tokio::test]
async fn seeding_is_idempotent() {
    let app = TestApp::spawn().await;

    let seeded_again = seed::seed_activities(&app.db).await.unwrap();

    assert!(!seeded_again);
    let rosters = CatalogStore::new(&app.db).list_activities().await.unwrap();
    assert_eq!(rosters.len(), DEFAULT_ACTIVITIES.len());
    assert_eq!(app.participant_count().await, 6);
    assert_eq!(app.enrollment_count().await, 6);
}

#[tokio::test]
async fn seeding_is_skipped_when_any_activity_exists() {
    let app = TestApp::spawn_with_seed(false).await;
    app.create_activity("Existing Club", 5).await;

    let seeded = seed::seed_activities(&app.db).await.unwrap();

    assert!(!seeded);
    let rosters = CatalogStore::new(&app.db).list_activities().await.unwrap();
    assert_eq!(rosters.len(), 1);
    assert_eq!(rosters[0].activity.name, "Existing Club");
}

#[tokio::test]
async fn shared_emails_map_to_one_participant() {
    let app = TestApp::spawn_with_seed(false).await;
    let catalog = [
        SeedActivity {
            name: "Art Club",
            description: "Painting",
            schedule: "Mondays",
            max_participants: 0,
            participants: &["shared@x.edu", "art@x.edu"],
        },
        SeedActivity {
            name: "Drama Club",
            description: "Acting",
            schedule: "Tuesdays",
            max_participants: 10,
            participants: &["shared@x.edu"],
        },
    ];

    assert!(seed::seed_with(&app.db, &catalog).await.unwrap());

    assert_eq!(app.participant_count().await, 2);
    assert_eq!(app.enrollment_count().await, 3);
    assert_eq!(
        app.roster("Art Club").await,
        vec!["shared@x.edu".to_string(), "art@x.edu".to_string()]
    );
}
