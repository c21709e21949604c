use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, IsolationLevel, SqlErr,
    TransactionTrait,
};
use tracing::info;

use crate::catalog::{ActivityRoster, CatalogStore};

/// Outcome of a rejected signup or unregister request.
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("Activity not found")]
    NotFound,
    #[error("Student is already signed up")]
    AlreadyEnrolled,
    #[error("Activity is full")]
    Full,
    #[error("Student is not signed up for this activity")]
    NotEnrolled,
    #[error("Invalid email: {0}")]
    InvalidEmail(&'static str),
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Emails are opaque identifiers: stored and compared exactly as given. The
/// only rejected value is the empty string.
pub fn require_email(email: &str) -> Result<&str, SignupError> {
    if email.is_empty() {
        return Err(SignupError::InvalidEmail("email must not be empty"));
    }
    Ok(email)
}

/// Business rules for enrolling students in activities.
///
/// Each write opens its own transaction; the activity row is locked before any
/// check so concurrent requests against the same activity are serialized.
pub struct SignupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SignupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every activity with its roster, read from one snapshot.
    pub async fn list_activities(&self) -> Result<Vec<ActivityRoster>, SignupError> {
        // SQLite transactions are already serialized by the single-connection pool.
        let txn = match self.db.get_database_backend() {
            DbBackend::Sqlite => self.db.begin().await?,
            _ => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::RepeatableRead),
                        Some(AccessMode::ReadOnly),
                    )
                    .await?
            }
        };
        let rosters = CatalogStore::new(&txn).list_activities().await?;
        txn.commit().await?;
        Ok(rosters)
    }

    /// Enroll `email` in the named activity, creating the participant on
    /// first sight.
    pub async fn signup(&self, activity_name: &str, email: &str) -> Result<(), SignupError> {
        let txn = self.db.begin().await?;
        let store = CatalogStore::new(&txn);

        let activity = store
            .find_activity_by_name_for_update(activity_name)
            .await?
            .ok_or(SignupError::NotFound)?;
        let email = require_email(email)?;

        if let Some(existing) = store.find_participant_by_email(email).await?
            && store.is_enrolled(activity.id, existing.id).await?
        {
            return Err(SignupError::AlreadyEnrolled);
        }

        if activity.max_participants > 0 {
            let enrolled = store.count_enrollments(activity.id).await?;
            if enrolled >= activity.max_participants as u64 {
                return Err(SignupError::Full);
            }
        }

        let participant = store.find_or_create_participant(email).await?;

        match store.add_enrollment(activity.id, participant.id).await {
            Ok(_) => {}
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(SignupError::AlreadyEnrolled);
            }
            Err(e) => return Err(e.into()),
        }

        txn.commit().await?;

        info!(
            activity_id = activity.id,
            participant_id = participant.id,
            "Signed up participant"
        );
        Ok(())
    }

    /// Remove `email` from the named activity. The participant row itself is
    /// kept.
    pub async fn unregister(&self, activity_name: &str, email: &str) -> Result<(), SignupError> {
        let txn = self.db.begin().await?;
        let store = CatalogStore::new(&txn);

        let activity = store
            .find_activity_by_name_for_update(activity_name)
            .await?
            .ok_or(SignupError::NotFound)?;
        let email = require_email(email)?;

        let participant = store
            .find_participant_by_email(email)
            .await?
            .ok_or(SignupError::NotEnrolled)?;

        if !store.remove_enrollment(activity.id, participant.id).await? {
            return Err(SignupError::NotEnrolled);
        }

        txn.commit().await?;

        info!(
            activity_id = activity.id,
            participant_id = participant.id,
            "Unregistered participant"
        );
        Ok(())
    }
}
