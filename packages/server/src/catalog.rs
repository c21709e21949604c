use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, sea_query::LockType,
    sea_query::OnConflict,
};

use crate::entity::{activity, participant, signup};

/// Fields for a new activity row.
#[derive(Debug, Clone)]
pub struct NewActivity<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub schedule: &'a str,
    pub max_participants: i32,
}

/// An activity together with the emails of its enrolled participants.
#[derive(Debug, Clone)]
pub struct ActivityRoster {
    pub activity: activity::Model,
    pub participants: Vec<String>,
}

/// Row-level access to activities, participants and their enrollments.
///
/// Every method runs on the connection the store was built with, so passing a
/// transaction makes all reads and writes part of that transaction.
pub struct CatalogStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CatalogStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_activity_by_name(
        &self,
        name: &str,
    ) -> Result<Option<activity::Model>, DbErr> {
        activity::Entity::find()
            .filter(activity::Column::Name.eq(name))
            .one(self.conn)
            .await
    }

    /// Look up an activity by name and lock its row until the surrounding
    /// transaction ends.
    ///
    /// SQLite has no row locks; there the single-connection pool provides the
    /// same exclusion.
    pub async fn find_activity_by_name_for_update(
        &self,
        name: &str,
    ) -> Result<Option<activity::Model>, DbErr> {
        let mut query = activity::Entity::find().filter(activity::Column::Name.eq(name));
        if self.conn.get_database_backend() != DbBackend::Sqlite {
            query = query.lock(LockType::Update);
        }
        query.one(self.conn).await
    }

    pub async fn find_participant_by_email(
        &self,
        email: &str,
    ) -> Result<Option<participant::Model>, DbErr> {
        participant::Entity::find()
            .filter(participant::Column::Email.eq(email))
            .one(self.conn)
            .await
    }

    /// Insert a participant. Fails with a unique constraint violation if the
    /// email is already taken.
    pub async fn create_participant(&self, email: &str) -> Result<participant::Model, DbErr> {
        participant::ActiveModel {
            email: Set(email.to_string()),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    /// Return the participant for `email`, creating it when unseen.
    ///
    /// A concurrent creator of the same email wins the unique constraint; the
    /// insert then does nothing and the second lookup returns its row.
    pub async fn find_or_create_participant(
        &self,
        email: &str,
    ) -> Result<participant::Model, DbErr> {
        if let Some(existing) = self.find_participant_by_email(email).await? {
            return Ok(existing);
        }

        let model = participant::ActiveModel {
            email: Set(email.to_string()),
            ..Default::default()
        };

        let result = participant::Entity::insert(model)
            .on_conflict(
                OnConflict::column(participant::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }

        self.find_participant_by_email(email).await?.ok_or_else(|| {
            DbErr::Custom(format!(
                "participant '{email}' missing after conflict-free insert"
            ))
        })
    }

    pub async fn create_activity(
        &self,
        new: NewActivity<'_>,
    ) -> Result<activity::Model, DbErr> {
        if new.max_participants < 0 {
            return Err(DbErr::Custom(format!(
                "max_participants must be >= 0, got {}",
                new.max_participants
            )));
        }

        activity::ActiveModel {
            name: Set(new.name.to_string()),
            description: Set(new.description.to_string()),
            schedule: Set(new.schedule.to_string()),
            max_participants: Set(new.max_participants),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    pub async fn has_any_activity(&self) -> Result<bool, DbErr> {
        Ok(activity::Entity::find().one(self.conn).await?.is_some())
    }

    /// All activities ordered by id, each with its participant emails in
    /// enrollment order.
    ///
    /// Issues two reads; run it on a snapshot transaction for a consistent
    /// view.
    pub async fn list_activities(&self) -> Result<Vec<ActivityRoster>, DbErr> {
        let activities = activity::Entity::find()
            .order_by_asc(activity::Column::Id)
            .all(self.conn)
            .await?;

        let rows = signup::Entity::find()
            .find_also_related(participant::Entity)
            .order_by_asc(signup::Column::SignedUpAt)
            .order_by_asc(signup::Column::ParticipantId)
            .all(self.conn)
            .await?;

        let mut emails_by_activity: HashMap<i32, Vec<String>> = HashMap::new();
        for (enrollment, p) in rows {
            if let Some(p) = p {
                emails_by_activity
                    .entry(enrollment.activity_id)
                    .or_default()
                    .push(p.email);
            }
        }

        Ok(activities
            .into_iter()
            .map(|activity| {
                let participants = emails_by_activity.remove(&activity.id).unwrap_or_default();
                ActivityRoster {
                    activity,
                    participants,
                }
            })
            .collect())
    }

    pub async fn participant_emails(&self, activity_id: i32) -> Result<Vec<String>, DbErr> {
        let rows = signup::Entity::find()
            .filter(signup::Column::ActivityId.eq(activity_id))
            .find_also_related(participant::Entity)
            .order_by_asc(signup::Column::SignedUpAt)
            .order_by_asc(signup::Column::ParticipantId)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, p)| p.map(|p| p.email))
            .collect())
    }

    pub async fn count_enrollments(&self, activity_id: i32) -> Result<u64, DbErr> {
        signup::Entity::find()
            .filter(signup::Column::ActivityId.eq(activity_id))
            .count(self.conn)
            .await
    }

    pub async fn is_enrolled(&self, activity_id: i32, participant_id: i32) -> Result<bool, DbErr> {
        Ok(signup::Entity::find_by_id((activity_id, participant_id))
            .one(self.conn)
            .await?
            .is_some())
    }

    pub async fn add_enrollment(
        &self,
        activity_id: i32,
        participant_id: i32,
    ) -> Result<signup::Model, DbErr> {
        signup::ActiveModel {
            activity_id: Set(activity_id),
            participant_id: Set(participant_id),
            signed_up_at: Set(Some(Utc::now())),
        }
        .insert(self.conn)
        .await
    }

    /// Delete an enrollment. Returns whether a row was removed.
    pub async fn remove_enrollment(
        &self,
        activity_id: i32,
        participant_id: i32,
    ) -> Result<bool, DbErr> {
        let result = signup::Entity::delete_by_id((activity_id, participant_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
