//! Household/animal compatibility heuristic.
//!
//! Six weighted components add up to at most 100. Inputs are not clamped:
//! trait values outside 1..=10 flow straight through the arithmetic.

use serde::Serialize;

use super::round1;
use crate::entities::animal::{self, SizeCategory, Species};
use crate::entities::user_profile;

const CHILD_WEIGHT: f64 = 25.0;
const OTHER_PET_WEIGHT: f64 = 20.0;
const ACTIVITY_WEIGHT: f64 = 15.0;
const CONDITIONS_CAP: f64 = 15.0;

/// Per-component scores plus their rounded total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompatibilityBreakdown {
    pub children: f64,
    pub other_pets: f64,
    pub activity: f64,
    pub size: f64,
    pub experience: f64,
    pub conditions: f64,
    pub total: f64,
}

/// One bar of a category/value chart handed to the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub category: &'static str,
    pub value: f64,
}

pub fn score(profile: &user_profile::Model, animal: &animal::Model) -> f64 {
    breakdown(profile, animal).total
}

pub fn breakdown(profile: &user_profile::Model, animal: &animal::Model) -> CompatibilityBreakdown {
    let children = if profile.has_children {
        animal.child_friendly as f64 / 10.0 * CHILD_WEIGHT
    } else {
        CHILD_WEIGHT / 2.0
    };

    let other_pets = if profile.has_other_pets {
        animal.other_pet_friendly as f64 / 10.0 * OTHER_PET_WEIGHT
    } else {
        OTHER_PET_WEIGHT / 2.0
    };

    let gap = (animal.activity_level - profile.pref_activity_level).abs();
    let activity = (10 - gap).max(0) as f64 / 10.0 * ACTIVITY_WEIGHT;

    let size = match profile.pref_size {
        Some(preferred) if preferred == animal.size_category => 15.0,
        Some(_) => 5.0,
        None => 10.0,
    };

    let experience = if profile.experience_years >= 3 && animal.activity_level <= 7 {
        10.0
    } else if profile.experience_years >= 1 {
        7.0
    } else {
        5.0
    };

    let mut conditions: f64 = match animal.species {
        Species::Dog if profile.daily_walk_time >= 60 => 15.0,
        Species::Dog if profile.daily_walk_time >= 30 => 10.0,
        Species::Dog => 5.0,
        Species::Cat => 12.0,
    };
    if animal.size_category == SizeCategory::Large && profile.has_garden {
        conditions += 3.0;
    }
    let conditions = conditions.min(CONDITIONS_CAP);

    CompatibilityBreakdown {
        children,
        other_pets,
        activity,
        size,
        experience,
        conditions,
        total: round1(children + other_pets + activity + size + experience + conditions),
    }
}

/// Trait profile of an animal on the 1..=10 scale, size mapped to 5/7/9.
pub fn animal_chart(animal: &animal::Model) -> Vec<ChartPoint> {
    let size = match animal.size_category {
        SizeCategory::Small => 5.0,
        SizeCategory::Medium => 7.0,
        SizeCategory::Large => 9.0,
    };

    vec![
        ChartPoint { category: "children", value: animal.child_friendly as f64 },
        ChartPoint { category: "pets", value: animal.other_pet_friendly as f64 },
        ChartPoint { category: "activity", value: animal.activity_level as f64 },
        ChartPoint { category: "size", value: size },
    ]
}
