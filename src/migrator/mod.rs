use sea_orm_migration::prelude::*;

mod m20260101_000001_create_table;
mod m20260105_000002_create_user_profiles;
mod m20260112_000003_create_adoption_applications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_table::Migration),
            Box::new(m20260105_000002_create_user_profiles::Migration),
            Box::new(m20260112_000003_create_adoption_applications::Migration),
        ]
    }
}
