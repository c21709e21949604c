use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::service::SignupError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `ALREADY_SIGNED_UP`, `ACTIVITY_FULL`, `NOT_SIGNED_UP`, `INTERNAL_ERROR`.
    #[schema(example = "ALREADY_SIGNED_UP")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Student is already signed up")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    AlreadySignedUp,
    ActivityFull,
    NotSignedUp,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::AlreadySignedUp => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "ALREADY_SIGNED_UP",
                    message: "Student is already signed up".into(),
                },
            ),
            AppError::ActivityFull => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "ACTIVITY_FULL",
                    message: "Activity is full".into(),
                },
            ),
            AppError::NotSignedUp => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "NOT_SIGNED_UP",
                    message: "Student is not signed up for this activity".into(),
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<SignupError> for AppError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::NotFound => AppError::NotFound("Activity not found".into()),
            SignupError::AlreadyEnrolled => AppError::AlreadySignedUp,
            SignupError::Full => AppError::ActivityFull,
            SignupError::NotEnrolled => AppError::NotSignedUp,
            SignupError::InvalidEmail(reason) => AppError::Validation(reason.into()),
            SignupError::Database(e) => e.into(),
        }
    }
}
