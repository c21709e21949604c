use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Enrollment of a participant in an activity. The composite key keeps each
/// pair unique.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "signups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub activity_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub participant_id: i32,
    #[sea_orm(belongs_to, from = "activity_id", to = "id")]
    pub activity: HasOne<super::activity::Entity>,
    #[sea_orm(belongs_to, from = "participant_id", to = "id")]
    pub participant: HasOne<super::participant::Entity>,

    /// Unset on rows written before the column existed.
    pub signed_up_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
