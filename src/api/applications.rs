use std::sync::Arc;

use axum::extract::{Extension, Json};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use super::error::ApiError;
use crate::entities::{adoption_application, animal};
use crate::matching::statistics::{self, StatusBreakdown};

#[derive(Serialize)]
pub struct ApplicationResponse {
    #[serde(flatten)]
    pub application: adoption_application::Model,
    pub animal_name: Option<String>,
}

#[derive(Serialize)]
pub struct MyApplicationsResponse {
    pub applications: Vec<ApplicationResponse>,
    pub breakdown: StatusBreakdown,
}

// GET /my-applications/ - Current user's applications, newest first
pub async fn my_applications(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
) -> Result<Json<MyApplicationsResponse>, ApiError> {
    let rows = adoption_application::Entity::find()
        .filter(adoption_application::Column::UserId.eq(user_id))
        .order_by_desc(adoption_application::Column::CreatedAt)
        .find_also_related(animal::Entity)
        .all(&*db)
        .await?;

    let (applications, animals): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
    let breakdown = statistics::status_breakdown(&applications);

    tracing::Span::current()
        .record("table", "adoption_applications")
        .record("action", "list_my_applications");

    Ok(Json(MyApplicationsResponse {
        applications: applications
            .into_iter()
            .zip(animals)
            .map(|(application, animal)| ApplicationResponse {
                application,
                animal_name: animal.map(|a| a.display_name()),
            })
            .collect(),
        breakdown,
    }))
}
