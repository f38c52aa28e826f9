pub mod api;
pub mod config;
pub mod entities;
pub mod matching;
pub mod metrics;
pub mod migrator;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod validation;

pub use sea_orm;
