use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;

use super::animals::AnimalResponse;
use super::error::ApiError;
use super::middleware::MaybeUser;
use crate::entities::{adoption_application, animal, user, user_profile};
use crate::services::adoption::{self, ApplicantFields};
use crate::services::profile;

#[derive(Serialize)]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct AdoptionFormResponse {
    pub animal: AnimalResponse,
    pub form: ApplicationForm,
    /// Score the application would be stamped with if submitted now.
    pub predicted_score: f64,
}

async fn load_animal(db: &DatabaseConnection, animal_id: i32) -> Result<animal::Model, ApiError> {
    tracing::Span::current().record("animal_id", animal_id);
    animal::Entity::find_by_id(animal_id)
        .one(db)
        .await?
        .ok_or(ApiError::NotFound("animal"))
}

async fn load_profile(
    db: &DatabaseConnection,
    user_id: Option<i32>,
) -> Result<Option<user_profile::Model>, ApiError> {
    match user_id {
        Some(user_id) => Ok(profile::find_for_user(db, user_id).await?),
        None => Ok(None),
    }
}

// GET /animal/:id/adopt/ - Prefilled application form
pub async fn adoption_form(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    MaybeUser(user_id): MaybeUser,
    Path(animal_id): Path<i32>,
) -> Result<Json<AdoptionFormResponse>, ApiError> {
    let animal = load_animal(&*db, animal_id).await?;
    let profile = load_profile(&*db, user_id).await?;
    let email = match user_id {
        Some(user_id) => user::Entity::find_by_id(user_id)
            .one(&*db)
            .await?
            .map(|u| u.email)
            .unwrap_or_default(),
        None => String::new(),
    };

    Ok(Json(AdoptionFormResponse {
        predicted_score: adoption::compatibility_for(profile.as_ref(), &animal),
        form: ApplicationForm {
            full_name: String::new(),
            email,
            phone: profile.map(|p| p.phone).unwrap_or_default(),
            message: String::new(),
        },
        animal: animal.into(),
    }))
}

// POST /animal/:id/adopt/ - Submit an adoption application
pub async fn submit_application(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    MaybeUser(user_id): MaybeUser,
    Path(animal_id): Path<i32>,
    Json(fields): Json<ApplicantFields>,
) -> Result<(StatusCode, Json<adoption_application::Model>), ApiError> {
    let animal = load_animal(&*db, animal_id).await?;
    let profile = load_profile(&*db, user_id).await?;

    let application =
        adoption::submit(&*db, &animal, fields, profile.as_ref(), user_id).await?;

    crate::metrics::record_application(animal.species, application.compatibility_score);
    tracing::Span::current()
        .record("table", "adoption_applications")
        .record("action", "submit_application")
        .record("business_event", "Adoption application submitted");

    Ok((StatusCode::CREATED, Json(application)))
}
