//! Household profile maintenance.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use serde::Deserialize;
use validator::Validate;

use crate::entities::animal::SizeCategory;
use crate::entities::user_profile::{self, HomeType};
use crate::validation::{phone_number, FieldErrors};

/// Partial profile edit; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(
        length(max = 20, message = "Ensure this value has at most 20 characters."),
        custom(function = "phone_number")
    )]
    pub phone: Option<String>,
    pub home_type: Option<String>,
    pub has_children: Option<bool>,
    #[validate(length(max = 50, message = "Ensure this value has at most 50 characters."))]
    pub children_age: Option<String>,
    pub has_other_pets: Option<bool>,
    pub other_pets_info: Option<String>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub experience_years: Option<i32>,
    #[validate(range(min = 1, max = 10, message = "Ensure this value is between 1 and 10."))]
    pub pref_child_friendly: Option<i32>,
    #[validate(range(min = 1, max = 10, message = "Ensure this value is between 1 and 10."))]
    pub pref_pet_friendly: Option<i32>,
    #[validate(range(min = 1, max = 10, message = "Ensure this value is between 1 and 10."))]
    pub pref_activity_level: Option<i32>,
    /// Blank clears the preference.
    pub pref_size: Option<String>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub daily_walk_time: Option<i32>,
    pub has_garden: Option<bool>,
    #[validate(length(max = 50, message = "Ensure this value has at most 50 characters."))]
    pub work_schedule: Option<String>,
}

fn parse_home_type(value: &str) -> Option<HomeType> {
    match value.trim().to_ascii_lowercase().as_str() {
        "apartment" => Some(HomeType::Apartment),
        "house" => Some(HomeType::House),
        "dacha" => Some(HomeType::Dacha),
        "other" => Some(HomeType::Other),
        _ => None,
    }
}

impl ProfileUpdate {
    /// Checks the update and applies it onto `current`. The compatibility
    /// scorer trusts stored values, so ranges are enforced here.
    pub fn apply_to(
        self,
        current: user_profile::Model,
    ) -> Result<user_profile::ActiveModel, FieldErrors> {
        let update = Self {
            phone: self.phone.map(|phone| phone.trim().to_string()),
            ..self
        };
        let mut errors = FieldErrors::new();
        if let Err(failures) = update.validate() {
            errors.merge(failures);
        }
        let mut profile = current.into_active_model();

        if let Some(phone) = update.phone {
            profile.phone = Set(phone);
        }
        if let Some(home_type) = update.home_type {
            match parse_home_type(&home_type) {
                Some(home_type) => profile.home_type = Set(home_type),
                None => errors.add("home_type", "Select a valid choice."),
            }
        }
        if let Some(has_children) = update.has_children {
            profile.has_children = Set(has_children);
        }
        if let Some(children_age) = update.children_age {
            profile.children_age = Set(children_age);
        }
        if let Some(has_other_pets) = update.has_other_pets {
            profile.has_other_pets = Set(has_other_pets);
        }
        if let Some(info) = update.other_pets_info {
            profile.other_pets_info = Set(info);
        }
        if let Some(years) = update.experience_years {
            profile.experience_years = Set(years);
        }
        if let Some(value) = update.pref_child_friendly {
            profile.pref_child_friendly = Set(value);
        }
        if let Some(value) = update.pref_pet_friendly {
            profile.pref_pet_friendly = Set(value);
        }
        if let Some(value) = update.pref_activity_level {
            profile.pref_activity_level = Set(value);
        }
        if let Some(size) = update.pref_size {
            if size.trim().is_empty() {
                profile.pref_size = Set(None);
            } else {
                match SizeCategory::from_param(&size) {
                    Some(size) => profile.pref_size = Set(Some(size)),
                    None => errors.add("pref_size", "Select a valid choice."),
                }
            }
        }
        if let Some(minutes) = update.daily_walk_time {
            profile.daily_walk_time = Set(minutes);
        }
        if let Some(has_garden) = update.has_garden {
            profile.has_garden = Set(has_garden);
        }
        if let Some(schedule) = update.work_schedule {
            profile.work_schedule = Set(schedule);
        }

        profile.updated_at = Set(chrono::Utc::now().naive_utc());
        errors.into_result(profile)
    }
}

pub async fn find_for_user<C>(db: &C, user_id: i32) -> Result<Option<user_profile::Model>, DbErr>
where
    C: ConnectionTrait,
{
    user_profile::Entity::find()
        .filter(user_profile::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Returns the user's profile, creating the default one for accounts that
/// predate automatic profile creation.
pub async fn ensure_for_user<C>(db: &C, user_id: i32) -> Result<user_profile::Model, DbErr>
where
    C: ConnectionTrait,
{
    if let Some(profile) = find_for_user(db, user_id).await? {
        return Ok(profile);
    }

    tracing::info!(user_id, "creating missing household profile");
    let now = chrono::Utc::now().naive_utc();
    user_profile::default_for_user(user_id, now).insert(db).await
}
