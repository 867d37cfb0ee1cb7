//! End-to-end tests for the task API router.
//!
//! Drives the real router (in-memory store, live middleware) through
//! `tower::ServiceExt::oneshot` without binding a socket.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use mockable::DefaultClock;
use serde_json::{Value, json};
use std::sync::Arc;
use taskdesk::http::{AppState, CORRELATION_HEADER, build_router};
use taskdesk::task::adapters::memory::InMemoryTaskRepository;
use taskdesk::task::domain::{Task, TaskId};
use taskdesk::task::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
use taskdesk::task::services::TaskService;
use tower::ServiceExt;

const PREFIX: &str = "/api";

fn app() -> Router {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = TaskService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    build_router(PREFIX, AppState { service, repository })
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

#[tokio::test(flavor = "multi_thread")]
async fn crud_scenario_walks_the_full_task_lifecycle() {
    let router = app();

    // Create.
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/tasks",
            json!({ "title": "Buy milk" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["description"], "");
    assert_eq!(created["completed"], false);
    assert_eq!(created["createdAt"], created["updatedAt"]);
    let id = created["id"].as_str().expect("id should be a string").to_owned();

    // Read back the same object.
    let response = router
        .clone()
        .oneshot(empty_request("GET", &format!("/api/tasks/{id}")))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, created);

    // Complete it; title must survive.
    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/tasks/{id}"),
            json!({ "completed": true }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["title"], "Buy milk");

    // Delete returns no body.
    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/tasks/{id}")))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    assert!(bytes.is_empty());

    // Gone now.
    let response = router
        .clone()
        .oneshot(empty_request("GET", &format!("/api/tasks/{id}")))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Task not found");

    // Missing title fails validation with a field-level problem list.
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/tasks",
            json!({ "description": "no title" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"][0]["field"], "title");
    assert_eq!(body["error"][0]["message"], "title is required");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_is_empty_on_a_fresh_store_and_grows_with_creates() {
    let router = app();

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/tasks"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!([]));

    for index in 0..3u8 {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/tasks",
                json!({ "title": format!("task {index}") }),
            ))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/tasks"))
        .await
        .expect("request should succeed");
    let listed = response_json(response).await;
    let tasks = listed.as_array().expect("list should be an array");
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0]["title"], "task 0");
    assert_eq!(tasks[2]["title"], "task 2");
}

#[tokio::test(flavor = "multi_thread")]
async fn inbound_correlation_id_is_echoed_on_success_and_error() {
    let router = app();

    let mut request = empty_request("GET", "/api/tasks");
    request
        .headers_mut()
        .insert(CORRELATION_HEADER, "test-correlation-42".parse().expect("valid header"));
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    assert_eq!(
        response.headers().get(CORRELATION_HEADER).map(|v| v.to_str().ok()),
        Some(Some("test-correlation-42"))
    );

    // The header also rides error responses.
    let mut request = empty_request("GET", &format!("/api/tasks/{}", TaskId::new()));
    request
        .headers_mut()
        .insert(CORRELATION_HEADER, "test-correlation-43".parse().expect("valid header"));
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(CORRELATION_HEADER).map(|v| v.to_str().ok()),
        Some(Some("test-correlation-43"))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_correlation_id_gets_a_fresh_one() {
    let response = app()
        .oneshot(empty_request("GET", "/healthz"))
        .await
        .expect("request should succeed");

    let header = response
        .headers()
        .get(CORRELATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .expect("correlation header should be present");
    assert!(!header.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_task_id_maps_to_not_found() {
    let response = app()
        .oneshot(empty_request("GET", "/api/tasks/not-a-uuid"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_empty_title_is_rejected() {
    let router = app();
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/tasks",
            json!({ "title": "Buy milk" }),
        ))
        .await
        .expect("request should succeed");
    let created = response_json(response).await;
    let id = created["id"].as_str().expect("id should be a string").to_owned();

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/tasks/{id}"),
            json!({ "title": "" }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"][0]["field"], "title");
}

#[tokio::test(flavor = "multi_thread")]
async fn liveness_always_reports_ok() {
    let response = app()
        .oneshot(empty_request("GET", "/healthz"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn readiness_reports_connected_repository() {
    let response = app()
        .oneshot(empty_request("GET", "/ready"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({ "status": "ok", "repository": "connected" })
    );
}

mockall::mock! {
    Repo {}

    #[async_trait::async_trait]
    impl TaskRepository for Repo {
        async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn save(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()>;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn readiness_reports_unavailable_when_the_store_fails() {
    let mut repo = MockRepo::new();
    repo.expect_find_all().returning(|| {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "backing medium failed",
        )))
    });
    let repository = Arc::new(repo);
    let service = TaskService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    let router = build_router(PREFIX, AppState { service, repository });

    let response = router
        .oneshot(empty_request("GET", "/ready"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response_json(response).await,
        json!({ "status": "unavailable", "repository": "disconnected" })
    );
}
