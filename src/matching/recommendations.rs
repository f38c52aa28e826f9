//! Ranks available animals for one household profile.

use serde::Serialize;

use super::compatibility::score;
use super::mean1;
use super::statistics::count_species;
use crate::entities::animal::{self, Species};
use crate::entities::user_profile;

/// How many ranked animals are presented.
pub const TOP_N: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredAnimal {
    pub animal: animal::Model,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSummary {
    pub total_count: usize,
    pub avg_compatibility: Option<f64>,
    pub cats_count: usize,
    pub dogs_count: usize,
    pub top_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub animals: Vec<ScoredAnimal>,
    pub summary: RecommendationSummary,
}

/// Scores every candidate, sorts by score descending (stable, so equal
/// scores keep the candidates' order) and keeps the top [`TOP_N`]. The
/// summary is computed before truncation.
pub fn rank(profile: &user_profile::Model, candidates: Vec<animal::Model>) -> Recommendations {
    let mut scored: Vec<ScoredAnimal> = candidates
        .into_iter()
        .map(|animal| ScoredAnimal {
            score: score(profile, &animal),
            animal,
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let summary = RecommendationSummary {
        total_count: scored.len(),
        avg_compatibility: mean1(scored.iter().map(|s| s.score)),
        cats_count: count_species(scored.iter().map(|s| &s.animal), Species::Cat),
        dogs_count: count_species(scored.iter().map(|s| &s.animal), Species::Dog),
        top_score: scored.first().map(|s| s.score),
    };

    scored.truncate(TOP_N);

    Recommendations {
        animals: scored,
        summary,
    }
}
