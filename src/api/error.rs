use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::field::display;

use crate::services::accounts::RegistrationError;
use crate::services::adoption::SubmissionError;
use crate::validation::FieldErrors;

pub const PROFILE_EDIT_PATH: &str = "/profile/edit/";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(FieldErrors),
    #[error("registration rejected")]
    Registration(Vec<String>),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("authentication required")]
    Unauthorized,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("{0}")]
    Conflict(String),
    #[error("household profile required")]
    ProfileRequired,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::Span::current().record("error", display(&self));

        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::Registration(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{what} not found") })),
            )
                .into_response(),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid username or password" })),
            )
                .into_response(),
            ApiError::Conflict(message) => {
                (StatusCode::CONFLICT, Json(json!({ "error": message }))).into_response()
            }
            ApiError::ProfileRequired => (
                StatusCode::SEE_OTHER,
                [(header::LOCATION, PROFILE_EDIT_PATH)],
                Json(json!({
                    "message": "Fill in your household profile to get recommendations."
                })),
            )
                .into_response(),
            ApiError::Database(e) => {
                tracing::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<SubmissionError> for ApiError {
    fn from(value: SubmissionError) -> Self {
        match value {
            SubmissionError::Invalid(errors) => Self::Validation(errors),
            SubmissionError::Unavailable(_) => {
                Self::Conflict("This animal has already found a home.".to_string())
            }
            SubmissionError::Database(e) => Self::Database(e),
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(value: RegistrationError) -> Self {
        match value {
            RegistrationError::Rejected(errors) => Self::Registration(errors),
            other => {
                tracing::error!("registration failed: {}", other);
                Self::Registration(vec![
                    "Registration failed. Please try again later.".to_string(),
                ])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_profile_redirects_to_profile_edit() {
        let response = ApiError::ProfileRequired.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some(PROFILE_EDIT_PATH)
        );
    }

    #[test]
    fn unexpected_registration_failures_become_a_generic_message() {
        let err: ApiError = RegistrationError::Database(DbErr::Custom("boom".into())).into();
        match err {
            ApiError::Registration(messages) => {
                assert_eq!(messages.len(), 1);
                assert!(!messages[0].contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn field_errors_map_to_unprocessable_entity() {
        let mut errors = FieldErrors::new();
        errors.add("phone", "Enter a valid phone number.");
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
