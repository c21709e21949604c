use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,
    pub description: String,
    pub schedule: String,
    /// Maximum enrollments; 0 means unlimited.
    pub max_participants: i32,

    #[sea_orm(has_many, via = "signup")]
    pub participants: HasMany<super::participant::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
