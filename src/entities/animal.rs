use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum Species {
    #[sea_orm(string_value = "cat")]
    Cat,
    #[sea_orm(string_value = "dog")]
    Dog,
}

impl Species {
    /// Parses a query-string value; blank or unknown values yield `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cat" => Some(Self::Cat),
            "dog" => Some(Self::Dog),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Dog => "dog",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    #[sea_orm(string_value = "small")]
    Small,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "large")]
    Large,
}

impl SizeCategory {
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "animals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub shelter_id: i32,
    /// Blank when the animal arrived without a name.
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub age: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub child_friendly: i32,
    pub other_pet_friendly: i32,
    pub activity_level: i32,
    pub size_category: SizeCategory,
    pub photo: Option<String>,
    pub arrival_date: Date,
    pub is_available: bool,
}

impl Model {
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Unnamed {}", self.species.label())
        } else {
            format!("{} ({})", self.name, self.species.label())
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shelter::Entity",
        from = "Column::ShelterId",
        to = "super::shelter::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Shelter,
    #[sea_orm(has_many = "super::adoption_application::Entity")]
    AdoptionApplication,
}

impl Related<super::shelter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shelter.def()
    }
}

impl Related<super::adoption_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdoptionApplication.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
