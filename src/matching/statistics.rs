//! In-memory aggregates over already-fetched collections.

use std::collections::HashMap;

use serde::Serialize;

use super::mean1;
use crate::entities::adoption_application::{self, ApplicationStatus};
use crate::entities::animal::{self, Species};
use crate::entities::shelter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingStats {
    pub total_count: usize,
    pub avg_child_friendly: f64,
    pub avg_activity: f64,
    pub cats_count: usize,
    pub dogs_count: usize,
}

/// Summary of the filtered listing, `None` when nothing matched.
pub fn listing_stats(animals: &[animal::Model]) -> Option<ListingStats> {
    let avg_child_friendly = mean1(animals.iter().map(|a| a.child_friendly as f64))?;
    let avg_activity = mean1(animals.iter().map(|a| a.activity_level as f64))?;

    Some(ListingStats {
        total_count: animals.len(),
        avg_child_friendly,
        avg_activity,
        cats_count: count_species(animals, Species::Cat),
        dogs_count: count_species(animals, Species::Dog),
    })
}

pub(crate) fn count_species<'a, I>(animals: I, species: Species) -> usize
where
    I: IntoIterator<Item = &'a animal::Model>,
{
    animals.into_iter().filter(|a| a.species == species).count()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelterStats {
    pub shelter_id: i32,
    pub name: String,
    pub animal_count: usize,
    pub avg_age: f64,
    pub avg_child_friendly: f64,
}

/// Per-shelter figures over available animals. Shelters with nothing
/// available are left out; input shelter order is preserved.
pub fn shelter_statistics(
    shelters: &[shelter::Model],
    available: &[animal::Model],
) -> Vec<ShelterStats> {
    let mut by_shelter: HashMap<i32, Vec<&animal::Model>> = HashMap::new();
    for animal in available.iter().filter(|a| a.is_available) {
        by_shelter.entry(animal.shelter_id).or_default().push(animal);
    }

    shelters
        .iter()
        .filter_map(|shelter| {
            let animals = by_shelter.get(&shelter.id)?;
            Some(ShelterStats {
                shelter_id: shelter.id,
                name: shelter.name.clone(),
                animal_count: animals.len(),
                avg_age: mean1(animals.iter().map(|a| a.age as f64))?,
                avg_child_friendly: mean1(animals.iter().map(|a| a.child_friendly as f64))?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelterChartPoint {
    pub shelter: String,
    pub animal_count: usize,
}

pub fn shelter_chart(stats: &[ShelterStats]) -> Option<Vec<ShelterChartPoint>> {
    if stats.is_empty() {
        return None;
    }
    Some(
        stats
            .iter()
            .map(|s| ShelterChartPoint {
                shelter: s.name.clone(),
                animal_count: s.animal_count,
            })
            .collect(),
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub completed: usize,
}

pub fn status_breakdown(applications: &[adoption_application::Model]) -> StatusBreakdown {
    applications
        .iter()
        .fold(StatusBreakdown::default(), |mut acc, application| {
            acc.total += 1;
            match application.status {
                ApplicationStatus::Pending => acc.pending += 1,
                ApplicationStatus::Approved => acc.approved += 1,
                ApplicationStatus::Rejected => acc.rejected += 1,
                ApplicationStatus::Completed => acc.completed += 1,
            }
            acc
        })
}
