use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::ActivityRoster;

/// Query string accepted by the signup and unregister endpoints.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Student email address.
    #[param(example = "new@mergington.edu")]
    pub email: String,
}

/// One activity in the catalog listing, keyed by its name in the response.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ActivityResponse {
    #[schema(example = "Learn strategies and compete in chess tournaments")]
    pub description: String,
    #[schema(example = "Fridays, 3:30 PM - 5:00 PM")]
    pub schedule: String,
    /// Maximum number of participants; 0 means unlimited.
    #[schema(example = 12)]
    pub max_participants: i32,
    /// Emails of enrolled students, in signup order.
    pub participants: Vec<String>,
}

impl From<ActivityRoster> for ActivityResponse {
    fn from(roster: ActivityRoster) -> Self {
        Self {
            description: roster.activity.description,
            schedule: roster.activity.schedule,
            max_participants: roster.activity.max_participants,
            participants: roster.participants,
        }
    }
}

/// Activity name to details.
pub type ActivitiesResponse = BTreeMap<String, ActivityResponse>;

pub fn activities_response(rosters: Vec<ActivityRoster>) -> ActivitiesResponse {
    rosters
        .into_iter()
        .map(|roster| (roster.activity.name.clone(), ActivityResponse::from(roster)))
        .collect()
}

/// Confirmation returned by successful write operations.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Signed up new@mergington.edu for Chess Club")]
    pub message: String,
}
