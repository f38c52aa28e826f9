use std::sync::Arc;

use axum::extract::{Extension, Json, Path, Query};
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use serde::Serialize;

use super::error::ApiError;
use super::middleware::MaybeUser;
use crate::entities::{animal, shelter};
use crate::matching::listing::{self, ListingParams, ListingQuery, PageInfo};
use crate::matching::statistics::{self, ListingStats};
use crate::matching::{animal_chart, breakdown, ChartPoint, CompatibilityBreakdown};
use crate::services::profile;

#[derive(Serialize)]
pub struct AnimalResponse {
    #[serde(flatten)]
    pub animal: animal::Model,
    pub display_name: String,
}

impl From<animal::Model> for AnimalResponse {
    fn from(animal: animal::Model) -> Self {
        Self {
            display_name: animal.display_name(),
            animal,
        }
    }
}

#[derive(Serialize)]
pub struct ListingResponse {
    pub animals: Vec<AnimalResponse>,
    pub page: PageInfo,
    pub stats: Option<ListingStats>,
    pub filters: ListingQuery,
}

// GET / - Available animals with filters, sorting and statistics
pub async fn list_animals(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingResponse>, ApiError> {
    let query = ListingQuery::from(&params);
    let animals = query.select().all(&*db).await?;

    // Statistics cover the whole filtered set, not just the current page.
    let stats = statistics::listing_stats(&animals);
    let (animals, page) =
        listing::paginate(animals, query.page).ok_or(ApiError::NotFound("page"))?;

    tracing::Span::current()
        .record("table", "animals")
        .record("action", "list_animals");

    Ok(Json(ListingResponse {
        animals: animals.into_iter().map(AnimalResponse::from).collect(),
        page,
        stats,
        filters: query,
    }))
}

#[derive(Serialize)]
pub struct AnimalDetailResponse {
    pub animal: AnimalResponse,
    pub shelter: Option<shelter::Model>,
    pub chart: Vec<ChartPoint>,
    /// Present when the visitor is signed in and has a household profile.
    pub compatibility: Option<CompatibilityBreakdown>,
}

// GET /animal/:id/ - Animal detail with trait chart and personal compatibility
pub async fn get_animal(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    MaybeUser(user_id): MaybeUser,
    Path(animal_id): Path<i32>,
) -> Result<Json<AnimalDetailResponse>, ApiError> {
    tracing::Span::current().record("animal_id", animal_id);

    let animal = animal::Entity::find_by_id(animal_id)
        .one(&*db)
        .await?
        .ok_or(ApiError::NotFound("animal"))?;
    let shelter = animal.find_related(shelter::Entity).one(&*db).await?;

    let compatibility = match user_id {
        Some(user_id) => profile::find_for_user(&*db, user_id)
            .await?
            .map(|p| breakdown(&p, &animal)),
        None => None,
    };

    Ok(Json(AnimalDetailResponse {
        chart: animal_chart(&animal),
        animal: animal.into(),
        shelter,
        compatibility,
    }))
}
