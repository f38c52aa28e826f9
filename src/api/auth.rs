use std::sync::Arc;

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower_cookies::{Cookies, Key};

use super::error::ApiError;
use super::middleware::{end_session, start_session};
use crate::services::accounts::{self, Registration};

// GET /register/ - Fields expected by the registration form
pub async fn register_form() -> Json<Value> {
    Json(json!({
        "fields": ["username", "email", "password", "password_confirm"]
    }))
}

// POST /register/ - Create an account together with its household profile
pub async fn register(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<Registration>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = accounts::register(&*db, payload).await.map_err(|e| {
        tracing::Span::current()
            .record("table", "users")
            .record("action", "register_user_failed");
        ApiError::from(e)
    })?;

    tracing::Span::current()
        .record("table", "users")
        .record("action", "register_user")
        .record("user_id", user.id)
        .record("business_event", "User registered successfully");
    crate::metrics::record_registration();

    Ok((
        StatusCode::CREATED,
        Json(json!({"id": user.id, "username": user.username, "email": user.email})),
    ))
}

#[derive(serde::Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

// GET /login/
pub async fn login_form() -> Json<Value> {
    Json(json!({ "fields": ["username", "password"] }))
}

// POST /login/
pub async fn login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(key): Extension<Key>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let Some(user) = accounts::authenticate(&*db, &payload.username, &payload.password).await?
    else {
        tracing::Span::current()
            .record("table", "users")
            .record("action", "login_user_failed");
        return Err(ApiError::InvalidCredentials);
    };

    start_session(&cookies, &key, user.id);

    tracing::Span::current()
        .record("table", "users")
        .record("action", "login_user")
        .record("user_id", user.id)
        .record("business_event", "User logged in successfully");

    Ok(Json(json!({"message": "Login successful"})))
}

// GET|POST /logout/
pub async fn logout(Extension(key): Extension<Key>, cookies: Cookies) -> Json<Value> {
    end_session(&cookies, &key);
    tracing::Span::current()
        .record("table", "users")
        .record("action", "logout_user");
    Json(json!({"message": "Logged out"}))
}
