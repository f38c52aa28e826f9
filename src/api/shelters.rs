use std::sync::Arc;

use axum::extract::{Extension, Json};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use super::error::ApiError;
use crate::entities::{animal, shelter};
use crate::matching::statistics::{self, ShelterChartPoint, ShelterStats};

#[derive(Serialize)]
pub struct ShelterStatsResponse {
    pub shelters: Vec<shelter::Model>,
    pub stats: Vec<ShelterStats>,
    pub chart: Option<Vec<ShelterChartPoint>>,
}

// GET /shelter-stats/
pub async fn shelter_stats(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<ShelterStatsResponse>, ApiError> {
    let shelters = shelter::Entity::find()
        .order_by_asc(shelter::Column::Id)
        .all(&*db)
        .await?;
    let available = animal::Entity::find()
        .filter(animal::Column::IsAvailable.eq(true))
        .all(&*db)
        .await?;

    let stats = statistics::shelter_statistics(&shelters, &available);
    let chart = statistics::shelter_chart(&stats);

    tracing::Span::current()
        .record("table", "shelters")
        .record("action", "shelter_stats");

    Ok(Json(ShelterStatsResponse {
        shelters,
        stats,
        chart,
    }))
}
