/// Integration tests for the HTTP surface with a real schema and a mock activity feed
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    routing::get,
};
use serde_json::{Value, json};
use sqlx::{Any, Pool, any::AnyPoolOptions};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;
use unistats_api::{
    AppState, get_city, get_university, github_stats, health, list_cities, list_universities,
};
use unistats_core::ReportConfig;
use unistats_db::{NewUniversity, cities, run_migrations, universities};
use unistats_github::MockActivitySource;

async fn setup_test_pool() -> Pool<Any> {
    // Install SQLite driver
    sqlx::any::install_default_drivers();

    // Create in-memory database
    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn report_config(unit_tests: &[(&str, u64)]) -> ReportConfig {
    ReportConfig {
        unit_tests: unit_tests
            .iter()
            .map(|(login, count)| (login.to_string(), *count))
            .collect::<BTreeMap<_, _>>(),
        ..ReportConfig::for_slug("owner/repo").unwrap()
    }
}

fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/githubstats", get(github_stats))
        .route("/api/universities", get(list_universities))
        .route("/api/universities/{id}", get(get_university))
        .route("/api/cities", get(list_cities))
        .route("/api/cities/{id}", get(get_city))
        .with_state(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let pool = setup_test_pool().await;
    let state = AppState::new(pool, Arc::new(MockActivitySource::new()), report_config(&[]));

    let (status, json) = get_json(create_app(state), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["database"]["connected"], true);
}

#[tokio::test]
async fn test_github_stats_single_contributor() {
    let pool = setup_test_pool().await;
    let source = MockActivitySource::new().with_commits("a", 5).with_issue("a");
    let state = AppState::new(pool, Arc::new(source), report_config(&[]));

    let (status, json) = get_json(create_app(state), "/githubstats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "user_stats": {"a": {"commits": 5, "issues": 1, "unit_tests": 0}},
            "total_stats": {"commits": 5, "issues": 1, "unit_tests": 0}
        })
    );
}

#[tokio::test]
async fn test_github_stats_unit_tests_and_issue_only_contributors() {
    let pool = setup_test_pool().await;
    let source = MockActivitySource::new()
        .with_commits("a", 5)
        .with_issue("b")
        .with_issue("b");
    let state = AppState::new(pool, Arc::new(source), report_config(&[("a", 7)]));

    let (status, json) = get_json(create_app(state), "/githubstats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["user_stats"]["a"],
        json!({"commits": 5, "issues": 0, "unit_tests": 7})
    );
    assert_eq!(
        json["user_stats"]["b"],
        json!({"commits": 0, "issues": 2, "unit_tests": 0})
    );
    assert_eq!(
        json["total_stats"],
        json!({"commits": 5, "issues": 2, "unit_tests": 7})
    );
}

#[tokio::test]
async fn test_github_stats_upstream_failure() {
    let pool = setup_test_pool().await;
    let state = AppState::new(
        pool,
        Arc::new(MockActivitySource::failing("API rate limit exceeded")),
        report_config(&[]),
    );

    let (status, json) = get_json(create_app(state), "/githubstats").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "github_error");
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("API rate limit exceeded")
    );
}

#[tokio::test]
async fn test_university_detail() {
    let pool = setup_test_pool().await;
    let rice = universities::create_university(
        &pool,
        &NewUniversity::new("Rice", 3900, 60000, 0.93, "Private"),
    )
    .await
    .unwrap();
    let houston = cities::find_or_create_city(&pool, "Houston").await.unwrap();
    cities::add_university(&pool, houston.id, rice.id)
        .await
        .unwrap();
    universities::add_major(&pool, rice.id, "CS", 100)
        .await
        .unwrap();
    universities::add_major(&pool, rice.id, "CS", 50)
        .await
        .unwrap();
    universities::add_ethnicity(&pool, rice.id, "Asian", 800)
        .await
        .unwrap();

    let state = AppState::new(pool, Arc::new(MockActivitySource::new()), report_config(&[]));
    let app = create_app(state);

    let (status, json) = get_json(app.clone(), "/api/universities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Rice");

    let (status, json) = get_json(app, &format!("/api/universities/{}", rice.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Rice");
    assert_eq!(json["public_or_private"], "Private");
    assert_eq!(json["city"]["name"], "Houston");

    let majors = json["majors"].as_array().unwrap();
    assert_eq!(majors.len(), 2);
    assert!(majors.iter().all(|m| m["name"] == "CS"));
    assert_eq!(majors[0]["num_students"], 50);
    assert_eq!(majors[1]["num_students"], 100);

    assert_eq!(
        json["ethnicities"],
        json!([{"id": 1, "name": "Asian", "num_students": 800}])
    );
}

#[tokio::test]
async fn test_city_detail() {
    let pool = setup_test_pool().await;
    let austin = cities::find_or_create_city(&pool, "Austin").await.unwrap();
    let ut = universities::create_university(
        &pool,
        &NewUniversity::new("UT Austin", 40000, 25000, 0.81, "Public"),
    )
    .await
    .unwrap();
    cities::add_university(&pool, austin.id, ut.id)
        .await
        .unwrap();
    cities::add_major(&pool, austin.id, "CS").await.unwrap();
    cities::add_major(&pool, austin.id, "CS").await.unwrap();
    cities::add_ethnicity(&pool, austin.id, "Hispanic")
        .await
        .unwrap();

    let state = AppState::new(pool, Arc::new(MockActivitySource::new()), report_config(&[]));
    let app = create_app(state);

    let (status, json) = get_json(app.clone(), "/api/cities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["name"], "Austin");
    assert_eq!(json[0]["population"], 0);

    let (status, json) = get_json(app, &format!("/api/cities/{}", austin.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Austin");
    assert_eq!(json["universities"][0]["name"], "UT Austin");
    assert_eq!(json["majors"].as_array().unwrap().len(), 2);
    assert_eq!(json["ethnicities"][0]["name"], "Hispanic");
    assert_eq!(json["ethnicities"][0]["total_count"], 0);
}

#[tokio::test]
async fn test_missing_rows_return_not_found() {
    let pool = setup_test_pool().await;
    let state = AppState::new(pool, Arc::new(MockActivitySource::new()), report_config(&[]));
    let app = create_app(state);

    let (status, json) = get_json(app.clone(), "/api/universities/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");

    let (status, json) = get_json(app, "/api/cities/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_github_stats_rejects_unset_repository() {
    let pool = setup_test_pool().await;
    let config = ReportConfig {
        repo: String::new(),
        ..report_config(&[])
    };
    // A failing source shows the request never reaches GitHub
    let state = AppState::new(
        pool,
        Arc::new(MockActivitySource::failing("should not be called")),
        config,
    );

    let (status, json) = get_json(create_app(state), "/githubstats").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "core_error");
}
