use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, Request},
    routing::get,
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use tower_cookies::{CookieManagerLayer, Key};

use crate::api;

async fn health_check() -> &'static str {
    "OK"
}

/// "METHOD /route/:param/" once routing has matched, the raw path otherwise.
fn span_name<B>(request: &Request<B>) -> String {
    match request.extensions().get::<axum::extract::MatchedPath>() {
        Some(path) => format!("{} {}", request.method(), path.as_str()),
        None => format!("{} {}", request.method(), request.uri().path()),
    }
}

/// Builds the application router. Metrics exposition is mounted by the
/// binary so tests can build routers without a global recorder.
pub fn app(db: Arc<DatabaseConnection>, session_key: Key, cors_origin: HeaderValue) -> Router {
    let public_routes = Router::new()
        .route("/", get(api::animals::list_animals))
        .route("/animal/:id/", get(api::animals::get_animal))
        .route(
            "/animal/:id/adopt/",
            get(api::adoption::adoption_form).post(api::adoption::submit_application),
        )
        .route("/shelter-stats/", get(api::shelters::shelter_stats))
        .route(
            "/register/",
            get(api::auth::register_form).post(api::auth::register),
        )
        .route("/login/", get(api::auth::login_form).post(api::auth::login))
        .route("/logout/", get(api::auth::logout).post(api::auth::logout));

    let protected_routes = Router::new()
        .route(
            "/profile/edit/",
            get(api::profile::get_profile).post(api::profile::update_profile),
        )
        .route(
            "/recommendations/",
            get(api::recommendations::get_recommendations),
        )
        .route(
            "/my-applications/",
            get(api::applications::my_applications),
        )
        .route_layer(axum::middleware::from_fn(api::middleware::auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(protected_routes)
        // As a route layer the span sees `MatchedPath`, set once routing is done.
        .route_layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &Request<axum::body::Body>| {
                    let name = span_name(request);

                    let user_ip = request
                        .headers()
                        .get("x-forwarded-for")
                        .or_else(|| request.headers().get("x-real-ip"))
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "request",
                        "otel.name" = name,
                        user_ip = user_ip,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        // Filled in by handlers
                        table = tracing::field::Empty,
                        action = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        animal_id = tracing::field::Empty,
                        business_event = tracing::field::Empty,
                        error = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_request(|_request: &Request<axum::body::Body>, _span: &tracing::Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
        .layer(Extension(db))
        .layer(Extension(session_key))
        .layer(CookieManagerLayer::new())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(cors_origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .allow_credentials(true),
        )
}
