use std::sync::Arc;

use axum::extract::{Extension, Json};
use sea_orm::{ActiveModelTrait, DatabaseConnection};

use super::error::ApiError;
use crate::entities::user_profile;
use crate::services::profile::{self, ProfileUpdate};

// GET /profile/edit/
pub async fn get_profile(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
) -> Result<Json<user_profile::Model>, ApiError> {
    Ok(Json(profile::ensure_for_user(&*db, user_id).await?))
}

// POST /profile/edit/ - Partial update of the household profile
pub async fn update_profile(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<user_profile::Model>, ApiError> {
    let current = profile::ensure_for_user(&*db, user_id).await?;
    let updated = payload
        .apply_to(current)
        .map_err(ApiError::Validation)?
        .update(&*db)
        .await?;

    tracing::Span::current()
        .record("table", "user_profiles")
        .record("action", "update_profile")
        .record("business_event", "Household profile updated");

    Ok(Json(updated))
}
