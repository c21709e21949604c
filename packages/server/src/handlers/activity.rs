use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Redirect;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::activity::*;
use crate::service::SignupService;
use crate::state::AppState;

/// Landing page served from the static directory.
pub const LANDING_PAGE: &str = "/static/index.html";

pub async fn root() -> Redirect {
    Redirect::temporary(LANDING_PAGE)
}

#[utoipa::path(
    get,
    path = "/activities",
    tag = "Activities",
    operation_id = "listActivities",
    summary = "List all activities",
    description = "Returns every activity keyed by name, with its description, schedule, capacity and the emails of enrolled students.",
    responses(
        (status = 200, description = "Activity catalog", body = BTreeMap<String, ActivityResponse>),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_activities(
    State(state): State<AppState>,
) -> Result<Json<ActivitiesResponse>, AppError> {
    let rosters = SignupService::new(&state.db).list_activities().await?;
    Ok(Json(activities_response(rosters)))
}

#[utoipa::path(
    post,
    path = "/activities/{activity_name}/signup",
    tag = "Activities",
    operation_id = "signupForActivity",
    summary = "Sign a student up for an activity",
    description = "Enrolls the student identified by `email`. Fails if the student is already enrolled or the activity has reached `max_participants` (0 means unlimited).",
    params(
        ("activity_name" = String, Path, description = "Activity name"),
        EmailQuery,
    ),
    responses(
        (status = 200, description = "Signed up", body = MessageResponse),
        (status = 400, description = "Already signed up, activity full or empty email (ALREADY_SIGNED_UP, ACTIVITY_FULL, VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Activity not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(activity_name = %activity_name))]
pub async fn signup_for_activity(
    State(state): State<AppState>,
    Path(activity_name): Path<String>,
    AppQuery(query): AppQuery<EmailQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    SignupService::new(&state.db)
        .signup(&activity_name, &query.email)
        .await?;

    Ok(Json(MessageResponse {
        message: format!("Signed up {} for {}", query.email, activity_name),
    }))
}

#[utoipa::path(
    delete,
    path = "/activities/{activity_name}/unregister",
    tag = "Activities",
    operation_id = "unregisterFromActivity",
    summary = "Unregister a student from an activity",
    description = "Removes the enrollment of the student identified by `email`. Fails if the student is not enrolled.",
    params(
        ("activity_name" = String, Path, description = "Activity name"),
        EmailQuery,
    ),
    responses(
        (status = 200, description = "Unregistered", body = MessageResponse),
        (status = 400, description = "Not signed up or empty email (NOT_SIGNED_UP, VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Activity not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(activity_name = %activity_name))]
pub async fn unregister_from_activity(
    State(state): State<AppState>,
    Path(activity_name): Path<String>,
    AppQuery(query): AppQuery<EmailQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    SignupService::new(&state.db)
        .unregister(&activity_name, &query.email)
        .await?;

    Ok(Json(MessageResponse {
        message: format!("Unregistered {} from {}", query.email, activity_name),
    }))
}
