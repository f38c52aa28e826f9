use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::animal::SizeCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum HomeType {
    #[sea_orm(string_value = "apartment")]
    Apartment,
    #[sea_orm(string_value = "house")]
    House,
    #[sea_orm(string_value = "dacha")]
    Dacha,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Household and lifestyle attributes used for compatibility scoring.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub phone: String,
    pub home_type: HomeType,
    pub has_children: bool,
    pub children_age: String,
    pub has_other_pets: bool,
    #[sea_orm(column_type = "Text")]
    pub other_pets_info: String,
    pub experience_years: i32,
    pub pref_child_friendly: i32,
    pub pref_pet_friendly: i32,
    pub pref_activity_level: i32,
    pub pref_size: Option<SizeCategory>,
    /// Minutes per day; only relevant for dogs.
    pub daily_walk_time: i32,
    pub has_garden: bool,
    pub work_schedule: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Defaults applied when a profile is created alongside a new account.
pub fn default_for_user(user_id: i32, now: DateTime) -> ActiveModel {
    use sea_orm::Set;

    ActiveModel {
        user_id: Set(user_id),
        phone: Set(String::new()),
        home_type: Set(HomeType::Apartment),
        has_children: Set(false),
        children_age: Set(String::new()),
        has_other_pets: Set(false),
        other_pets_info: Set(String::new()),
        experience_years: Set(0),
        pref_child_friendly: Set(5),
        pref_pet_friendly: Set(5),
        pref_activity_level: Set(5),
        pref_size: Set(None),
        daily_walk_time: Set(30),
        has_garden: Set(false),
        work_schedule: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}
