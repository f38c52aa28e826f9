use std::sync::Arc;

use axum::extract::{Extension, Json};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::error::ApiError;
use crate::entities::animal;
use crate::matching::recommendations::{self, Recommendations};
use crate::services::profile;

// GET /recommendations/ - Available animals ranked for the current household
pub async fn get_recommendations(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
) -> Result<Json<Recommendations>, ApiError> {
    let profile = profile::find_for_user(&*db, user_id)
        .await?
        .ok_or(ApiError::ProfileRequired)?;

    let candidates = animal::Entity::find()
        .filter(animal::Column::IsAvailable.eq(true))
        .order_by_asc(animal::Column::Id)
        .all(&*db)
        .await?;
    crate::metrics::record_recommendations(candidates.len());

    tracing::Span::current()
        .record("table", "animals")
        .record("action", "recommendations");

    Ok(Json(recommendations::rank(&profile, candidates)))
}
