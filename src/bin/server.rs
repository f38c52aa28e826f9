use std::sync::Arc;

use axum::{http::HeaderValue, routing::get};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use shelter_match::{config::AppConfig, migrator, routes};
use tower_cookies::Key;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] shelter_match::config::ConfigError),
    #[error(transparent)]
    Telemetry(#[from] shelter_match::telemetry::TelemetryError),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("CORS_ORIGIN is not a valid header value")]
    CorsOrigin,
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Signing key for session cookies. Without SESSION_KEY a random key is
/// used and sessions do not survive a restart.
fn session_key() -> Key {
    match std::env::var("SESSION_KEY") {
        Ok(secret) if secret.len() >= 64 => Key::from(secret.as_bytes()),
        _ => {
            tracing::warn!("SESSION_KEY missing or shorter than 64 bytes, using a random key");
            Key::generate()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    shelter_match::telemetry::init_telemetry(&config.telemetry)?;

    let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();

    let db = Database::connect(&config.database_url).await?;

    if config.run_migrations {
        migrator::Migrator::up(&db, None).await?;
    }

    shelter_match::metrics::init_metrics(&db).await?;

    let cors_origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| StartupError::CorsOrigin)?;

    let app = routes::app(Arc::new(db), session_key(), cors_origin)
        .layer(prometheus_layer)
        .route("/metrics", get(|| async move { metric_handle.render() }));

    let addr = config.server.socket_addr()?;
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
