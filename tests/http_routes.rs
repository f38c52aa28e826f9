use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{json, Value};
use shelter_match::entities::adoption_application::{self, ApplicationStatus};
use shelter_match::entities::animal::{self, SizeCategory, Species};
use shelter_match::entities::user_profile::{self, HomeType};
use shelter_match::entities::{shelter, user};
use shelter_match::matching;
use shelter_match::routes;
use tower::ServiceExt;
use tower_cookies::Key;

fn app(db: DatabaseConnection) -> Router {
    router(Arc::new(db))
}

fn router(db: Arc<DatabaseConnection>) -> Router {
    routes::app(
        db,
        Key::generate(),
        HeaderValue::from_static("http://localhost:3000"),
    )
}

/// Debug rendering of every statement the mock saw. Only callable once the
/// router has released its handle.
fn logged_statements(db: Arc<DatabaseConnection>) -> String {
    match Arc::try_unwrap(db) {
        Ok(db) => format!("{:?}", db.into_transaction_log()),
        Err(_) => panic!("connection still shared with the router"),
    }
}

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid timestamp")
}

fn animal(id: i32, name: &str, species: Species) -> animal::Model {
    animal::Model {
        id,
        shelter_id: 1,
        name: name.to_string(),
        species,
        breed: "Mixed".to_string(),
        age: 2,
        description: String::new(),
        child_friendly: 7,
        other_pet_friendly: 6,
        activity_level: 5,
        size_category: SizeCategory::Medium,
        photo: None,
        arrival_date: NaiveDate::from_ymd_opt(2026, 1, 10).expect("valid date"),
        is_available: true,
    }
}

fn account(password: &str) -> user::Model {
    let salt = SaltString::generate(&mut OsRng);
    user::Model {
        id: 7,
        username: "olga".to_string(),
        email: "olga@example.com".to_string(),
        password_hash: Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("hash")
            .to_string(),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn household(user_id: i32) -> user_profile::Model {
    user_profile::Model {
        id: 3,
        user_id,
        phone: "+7 900 111-22-33".to_string(),
        home_type: HomeType::House,
        has_children: true,
        children_age: "6".to_string(),
        has_other_pets: false,
        other_pets_info: String::new(),
        experience_years: 2,
        pref_child_friendly: 8,
        pref_pet_friendly: 5,
        pref_activity_level: 4,
        pref_size: Some(SizeCategory::Medium),
        daily_walk_time: 45,
        has_garden: true,
        work_schedule: "remote".to_string(),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn get_as(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request")
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Logs in through the real handler and returns the session cookie pair.
async fn login(app: &Router, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login/",
            json!({"username": "olga", "password": password}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("session cookie");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

#[tokio::test]
async fn health_check_responds() {
    let app = app(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let response = app.oneshot(get("/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn listing_returns_page_and_stats() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            animal(1, "Murka", Species::Cat),
            animal(2, "", Species::Dog),
        ]])
        .into_connection();

    let response = app(db)
        .oneshot(get("/?species=bird&sort_by=colour"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["stats"]["total_count"], 2);
    assert_eq!(body["stats"]["cats_count"], 1);
    assert_eq!(body["page"]["num_pages"], 1);
    assert_eq!(body["filters"]["sort_by"], "name");
    assert_eq!(body["filters"]["species"], Value::Null);
    assert_eq!(body["animals"][1]["display_name"], "Unnamed dog");
}

#[tokio::test]
async fn listing_page_past_the_end_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<animal::Model>::new()])
        .into_connection();

    let response = app(db).oneshot(get("/?page=3")).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_animal_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<animal::Model>::new()])
        .into_connection();

    let response = app(db).oneshot(get("/animal/99/")).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_application_reports_field_errors() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![animal(1, "Rex", Species::Dog)]])
        .into_connection();

    let response = app(db)
        .oneshot(json_request(
            "POST",
            "/animal/1/adopt/",
            json!({"full_name": "Ivan", "email": "ivan@example.com", "phone": "call me"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert!(body["errors"]["phone"].is_array());
    assert!(body["errors"].get("full_name").is_none());
}

#[tokio::test]
async fn anonymous_application_is_stored_as_pending_with_neutral_score() {
    let stored = adoption_application::Model {
        id: 5,
        animal_id: 1,
        user_id: None,
        full_name: "Ivan Petrov".to_string(),
        email: "ivan@example.com".to_string(),
        phone: "+7 900 000-00-00".to_string(),
        message: String::new(),
        compatibility_score: 50.0,
        status: ApplicationStatus::Pending,
        created_at: timestamp(),
        updated_at: timestamp(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![animal(1, "Rex", Species::Dog)]])
        .append_query_results([vec![stored]])
        .into_connection();

    let response = app(db)
        .oneshot(json_request(
            "POST",
            "/animal/1/adopt/",
            json!({
                "full_name": "Ivan Petrov",
                "email": "ivan@example.com",
                "phone": "+7 900 000-00-00"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["compatibility_score"], 50.0);
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn adopted_animal_rejects_applications() {
    let mut adopted = animal(1, "Rex", Species::Dog);
    adopted.is_available = false;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![adopted]])
        .into_connection();

    let response = app(db)
        .oneshot(json_request(
            "POST",
            "/animal/1/adopt/",
            json!({
                "full_name": "Ivan Petrov",
                "email": "ivan@example.com",
                "phone": "+7 900 000-00-00"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let app = app(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    for uri in ["/recommendations/", "/my-applications/", "/profile/edit/"] {
        let response = app.clone().oneshot(get(uri)).await.expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![account("kitten-lover")]])
        .into_connection();

    let response = app(db)
        .oneshot(json_request(
            "POST",
            "/login/",
            json!({"username": "olga", "password": "puppy-lover"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn recommendations_without_profile_redirect_to_profile_edit() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![account("kitten-lover")]])
        .append_query_results([Vec::<user_profile::Model>::new()])
        .into_connection();
    let app = app(db);
    let cookie = login(&app, "kitten-lover").await;

    let request = Request::builder()
        .uri("/recommendations/")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/profile/edit/")
    );
}

#[tokio::test]
async fn recommendations_are_ranked_and_truncated() {
    let candidates: Vec<animal::Model> = (1..=14)
        .map(|id| {
            let mut a = animal(id, &format!("Pet {id}"), Species::Dog);
            a.child_friendly = (id % 10) + 1;
            a
        })
        .collect();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![account("kitten-lover")]])
        .append_query_results([vec![household(7)]])
        .append_query_results([candidates])
        .into_connection();
    let app = app(db);
    let cookie = login(&app, "kitten-lover").await;

    let request = Request::builder()
        .uri("/recommendations/")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let ranked = body["animals"].as_array().expect("animals");
    assert_eq!(ranked.len(), 12);
    assert_eq!(body["summary"]["total_count"], 14);

    let scores: Vec<f64> = ranked
        .iter()
        .map(|entry| entry["score"].as_f64().expect("score"))
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(body["summary"]["top_score"].as_f64(), Some(scores[0]));
}

fn application(id: i32, animal_id: i32, status: ApplicationStatus) -> adoption_application::Model {
    adoption_application::Model {
        id,
        animal_id,
        user_id: Some(7),
        full_name: "Olga Ivanova".to_string(),
        email: "olga@example.com".to_string(),
        phone: "+7 900 111-22-33".to_string(),
        message: String::new(),
        compatibility_score: 72.5,
        status,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn shelter(id: i32, name: &str) -> shelter::Model {
    shelter::Model {
        id,
        name: name.to_string(),
        address: "Lenina 1".to_string(),
        phone: "+7 343 000-00-00".to_string(),
        email: format!("shelter{id}@example.com"),
        description: String::new(),
    }
}

#[tokio::test]
async fn listing_filters_reach_the_database_query() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![animal(1, "Murka", Species::Cat)]])
            .into_connection(),
    );

    let response = router(db.clone())
        .oneshot(get("/?species=cat&search=MUR&sort_by=age"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["filters"]["species"], "cat");
    assert_eq!(body["filters"]["search"], "MUR");
    assert_eq!(body["filters"]["sort_by"], "age");
    assert_eq!(body["animals"][0]["display_name"], "Murka (cat)");

    let statements = logged_statements(db);
    assert!(statements.contains("LIKE LOWER($"), "{statements}");
    assert!(statements.contains("%MUR%"), "{statements}");
    assert!(statements.contains(r#""cat""#), "{statements}");
}

#[tokio::test]
async fn registration_creates_account_and_profile() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                Vec::<user::Model>::new(),
                Vec::new(),
                vec![account("kitten-lover")],
            ])
            .append_query_results([vec![household(7)]])
            .into_connection(),
    );

    let response = router(db.clone())
        .oneshot(json_request(
            "POST",
            "/register/",
            json!({
                "username": "olga",
                "email": "Olga@Example.com",
                "password": "kitten-lover",
                "password_confirm": "kitten-lover"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["id"], 7);
    assert_eq!(body["username"], "olga");

    let statements = logged_statements(db);
    assert!(statements.contains(r#"INSERT INTO \"users\""#), "{statements}");
    assert!(
        statements.contains(r#"INSERT INTO \"user_profiles\""#),
        "{statements}"
    );
}

#[tokio::test]
async fn registration_collects_every_form_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new(), Vec::new()])
        .into_connection();

    let response = app(db)
        .oneshot(json_request(
            "POST",
            "/register/",
            json!({
                "username": "olga k",
                "email": "not-an-email",
                "password": "short",
                "password_confirm": "shorter"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    let errors = body["errors"].as_array().expect("error list");
    assert_eq!(errors.len(), 4, "{errors:?}");
    assert!(errors
        .iter()
        .any(|e| e.as_str().is_some_and(|e| e.contains("didn't match"))));
}

#[tokio::test]
async fn profile_edit_rejects_out_of_range_preferences() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![account("kitten-lover")]])
        .append_query_results([vec![household(7)]])
        .into_connection();
    let app = app(db);
    let cookie = login(&app, "kitten-lover").await;

    let request = Request::builder()
        .method("POST")
        .uri("/profile/edit/")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(
            json!({"pref_activity_level": 11, "daily_walk_time": -5}).to_string(),
        ))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(
        body["errors"]["pref_activity_level"][0],
        "Ensure this value is between 1 and 10."
    );
    assert!(body["errors"]["daily_walk_time"].is_array());
}

#[tokio::test]
async fn my_applications_lists_with_status_breakdown() {
    let rows = vec![
        (
            application(3, 1, ApplicationStatus::Pending),
            animal(1, "Murka", Species::Cat),
        ),
        (
            application(2, 2, ApplicationStatus::Approved),
            animal(2, "", Species::Dog),
        ),
        (
            application(1, 1, ApplicationStatus::Pending),
            animal(1, "Murka", Species::Cat),
        ),
    ];
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![account("kitten-lover")]])
        .append_query_results([rows])
        .into_connection();
    let app = app(db);
    let cookie = login(&app, "kitten-lover").await;

    let response = app
        .oneshot(get_as("/my-applications/", &cookie))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["breakdown"]["total"], 3);
    assert_eq!(body["breakdown"]["pending"], 2);
    assert_eq!(body["breakdown"]["approved"], 1);
    assert_eq!(body["breakdown"]["rejected"], 0);
    assert_eq!(body["applications"][0]["id"], 3);
    assert_eq!(body["applications"][0]["animal_name"], "Murka (cat)");
    assert_eq!(body["applications"][1]["animal_name"], "Unnamed dog");
}

#[tokio::test]
async fn shelter_stats_skip_shelters_without_available_animals() {
    let mut older = animal(2, "Rex", Species::Dog);
    older.age = 5;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![shelter(1, "Good Paws"), shelter(2, "Quiet Corner")]])
        .append_query_results([vec![animal(1, "Murka", Species::Cat), older]])
        .into_connection();

    let response = app(db)
        .oneshot(get("/shelter-stats/"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["shelters"].as_array().map(Vec::len), Some(2));
    let stats = body["stats"].as_array().expect("stats");
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["name"], "Good Paws");
    assert_eq!(stats[0]["animal_count"], 2);
    assert_eq!(stats[0]["avg_age"], 3.5);
    assert_eq!(body["chart"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn animal_detail_includes_compatibility_for_profile_holders() {
    let murka = animal(1, "Murka", Species::Cat);
    let expected = matching::score(&household(7), &murka);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![account("kitten-lover")]])
        .append_query_results([vec![murka]])
        .append_query_results([vec![shelter(1, "Good Paws")]])
        .append_query_results([vec![household(7)]])
        .into_connection();
    let app = app(db);
    let cookie = login(&app, "kitten-lover").await;

    let response = app
        .oneshot(get_as("/animal/1/", &cookie))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["compatibility"]["total"].as_f64(), Some(expected));
    assert_eq!(body["shelter"]["name"], "Good Paws");
    assert_eq!(body["chart"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn animal_detail_for_visitors_has_no_compatibility() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![animal(1, "Murka", Species::Cat)]])
        .append_query_results([vec![shelter(1, "Good Paws")]])
        .into_connection();

    let response = app(db).oneshot(get("/animal/1/")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["compatibility"], Value::Null);
}
