use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::activity::list_activities))
        .routes(routes!(handlers::activity::signup_for_activity))
        .routes(routes!(handlers::activity::unregister_from_activity))
}

/// Landing redirect and static assets; not part of the documented API.
pub fn site_routes(static_dir: &str) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::activity::root))
        .nest_service("/static", ServeDir::new(static_dir))
}
