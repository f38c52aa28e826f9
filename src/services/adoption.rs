//! Adoption application submission.

use chrono::NaiveDateTime;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};
use serde::Deserialize;
use validator::Validate;

use crate::entities::adoption_application::{self, ApplicationStatus};
use crate::entities::{animal, user_profile};
use crate::matching::compatibility;
use crate::validation::{phone_number, FieldErrors};

/// Score stamped on applications from visitors without a household profile.
pub const NEUTRAL_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ApplicantFields {
    #[serde(default)]
    #[validate(length(min = 1, max = 150, message = "Enter a name of 1 to 150 characters."))]
    pub full_name: String,
    #[serde(default)]
    #[validate(
        length(max = 254, message = "Ensure this value has at most 254 characters."),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 20, message = "Enter a phone number of 1 to 20 characters."),
        custom(function = "phone_number")
    )]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl ApplicantFields {
    /// Trims every field and checks it, collecting all failures.
    pub fn cleaned(self) -> Result<Self, FieldErrors> {
        let fields = Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        fields.validate()?;
        Ok(fields)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Invalid(FieldErrors),
    #[error("animal {0} is no longer available for adoption")]
    Unavailable(i32),
    #[error(transparent)]
    Database(#[from] DbErr),
}

pub fn compatibility_for(profile: Option<&user_profile::Model>, animal: &animal::Model) -> f64 {
    profile
        .map(|p| compatibility::score(p, animal))
        .unwrap_or(NEUTRAL_SCORE)
}

/// Builds the row for an already validated applicant.
pub fn new_application(
    animal: &animal::Model,
    applicant: ApplicantFields,
    profile: Option<&user_profile::Model>,
    user_id: Option<i32>,
    now: NaiveDateTime,
) -> adoption_application::ActiveModel {
    adoption_application::ActiveModel {
        animal_id: Set(animal.id),
        user_id: Set(user_id),
        full_name: Set(applicant.full_name),
        email: Set(applicant.email),
        phone: Set(applicant.phone),
        message: Set(applicant.message),
        compatibility_score: Set(compatibility_for(profile, animal)),
        status: Set(ApplicationStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

/// Validates and persists an application. Nothing is written when the
/// applicant fields are invalid or the animal has been adopted.
pub async fn submit<C>(
    db: &C,
    animal: &animal::Model,
    fields: ApplicantFields,
    profile: Option<&user_profile::Model>,
    user_id: Option<i32>,
) -> Result<adoption_application::Model, SubmissionError>
where
    C: ConnectionTrait,
{
    let applicant = fields.cleaned().map_err(SubmissionError::Invalid)?;
    if !animal.is_available {
        return Err(SubmissionError::Unavailable(animal.id));
    }

    let now = chrono::Utc::now().naive_utc();
    let application = new_application(animal, applicant, profile, user_id, now)
        .insert(db)
        .await?;

    tracing::info!(
        application_id = application.id,
        animal_id = animal.id,
        score = application.compatibility_score,
        "adoption application submitted"
    );

    Ok(application)
}
