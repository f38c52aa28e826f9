use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::{adoption_application, animal, shelter, user};

/// Seeds the gauges from the database so a restart does not reset them.
pub async fn init_metrics(db: &DatabaseConnection) -> Result<(), DbErr> {
    let user_count = user::Entity::find().count(db).await?;
    metrics::gauge!("shelter_users_total").set(user_count as f64);

    let application_count = adoption_application::Entity::find().count(db).await?;
    metrics::gauge!("shelter_applications_total").set(application_count as f64);

    let shelters = shelter::Entity::find().all(db).await?;
    let available = animal::Entity::find()
        .filter(animal::Column::IsAvailable.eq(true))
        .all(db)
        .await?;

    let mut per_shelter: HashMap<i32, usize> = HashMap::new();
    for a in &available {
        *per_shelter.entry(a.shelter_id).or_default() += 1;
    }
    for s in shelters {
        let count = per_shelter.get(&s.id).copied().unwrap_or(0);
        metrics::gauge!("shelter_available_animals", "shelter" => s.name).set(count as f64);
    }

    tracing::info!(
        "Initialized metrics: Users={}, Applications={}, AvailableAnimals={}",
        user_count,
        application_count,
        available.len()
    );
    Ok(())
}

pub fn record_registration() {
    metrics::counter!("shelter_users_registered_total").increment(1);
    metrics::gauge!("shelter_users_total").increment(1.0);
}

pub fn record_application(species: animal::Species, score: f64) {
    metrics::counter!("shelter_applications_submitted_total", "species" => species.label())
        .increment(1);
    metrics::gauge!("shelter_applications_total").increment(1.0);
    metrics::histogram!("shelter_application_compatibility_score").record(score);
}

pub fn record_recommendations(candidates: usize) {
    metrics::histogram!("shelter_recommendation_candidates").record(candidates as f64);
}
