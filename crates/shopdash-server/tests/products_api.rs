//! End-to-end tests for the product gateway HTTP surface
//!
//! Drive the real router with an on-disk SQLite database and a canned users
//! directory standing in for the users service.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use shopdash_server::error::ApiError;
use shopdash_server::services::UserDirectory;
use shopdash_server::storage::Database;
use shopdash_server::{build_router, AppState, BackendKind};
use shopdash_types::User;
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

/// Canned users directory: a fixed id set, or a hard outage.
struct StubDirectory {
    known: HashSet<String>,
    failing: bool,
}

impl StubDirectory {
    fn with_users(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            known: ids.iter().map(|s| s.to_string()).collect(),
            failing: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            known: HashSet::new(),
            failing: true,
        })
    }
}

#[async_trait]
impl UserDirectory for StubDirectory {
    async fn exists(&self, id: &str) -> Result<bool, ApiError> {
        if self.failing {
            return Err(ApiError::upstream("users-api error"));
        }
        Ok(self.known.contains(id))
    }

    async fn find(&self, id: &str) -> Result<Option<User>, ApiError> {
        if self.failing {
            return Err(ApiError::upstream("users-api error"));
        }
        Ok(self.known.get(id).map(|id| User {
            id: id.clone(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            extra: serde_json::Map::new(),
        }))
    }
}

struct TestApp {
    app: Router,
    _dir: tempfile::TempDir,
}

async fn spawn_app(backend: BackendKind, users: Arc<dyn UserDirectory>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shopdash.db");
    let db = Arc::new(Database::new(path.to_str().unwrap()).await.unwrap());
    let state = AppState::new(db, users, backend);
    TestApp {
        app: build_router(state),
        _dir: dir,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_the_active_backend() {
    let relational = spawn_app(BackendKind::Relational, StubDirectory::with_users(&[])).await;
    let (status, body) = send(&relational.app, get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "relational");

    let document = spawn_app(BackendKind::Document, StubDirectory::with_users(&[])).await;
    let (_, body) = send(&document.app, get_request("/health")).await;
    assert_eq!(body["backend"], "document");
}

#[tokio::test]
async fn db_health_probe_answers_ok() {
    let test = spawn_app(BackendKind::Relational, StubDirectory::with_users(&[])).await;
    let (status, body) = send(&test.app, get_request("/db/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (status, body) = send(&test.app, get_request("/cosmos/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn create_round_trips_through_the_relational_backend() {
    let test = spawn_app(BackendKind::Relational, StubDirectory::with_users(&["u1"])).await;

    let (status, created) = send(
        &test.app,
        json_request(
            "POST",
            "/products",
            json!({"name": "Widget", "price": 9.99, "userId": "u1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_string());
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["price"], 9.99);
    assert_eq!(created["userId"], "u1");
    assert!(created["createdAt"].is_string());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&test.app, get_request(&format!("/products/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Widget");
}

#[tokio::test]
async fn create_with_unknown_user_is_rejected_and_not_persisted() {
    let test = spawn_app(BackendKind::Relational, StubDirectory::with_users(&["u1"])).await;

    let (status, body) = send(
        &test.app,
        json_request(
            "POST",
            "/products",
            json!({"name": "Widget", "price": 9.99, "userId": "ghost"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "user does not exist"}));

    let (_, listed) = send(&test.app, get_request("/products")).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn create_during_directory_outage_is_an_upstream_fault() {
    let test = spawn_app(BackendKind::Relational, StubDirectory::failing()).await;

    let (status, body) = send(
        &test.app,
        json_request(
            "POST",
            "/products",
            json!({"name": "Widget", "price": 9.99, "userId": "u1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "users-api error"}));
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected() {
    let test = spawn_app(BackendKind::Relational, StubDirectory::with_users(&["u1"])).await;

    let (status, body) = send(
        &test.app,
        json_request("POST", "/products", json!({"name": "Widget"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "name, price, userId required"}));
}

#[tokio::test]
async fn relational_list_ignores_the_owner_filter() {
    let test = spawn_app(
        BackendKind::Relational,
        StubDirectory::with_users(&["u1", "u2"]),
    )
    .await;

    for (name, user) in [("A", "u1"), ("B", "u2")] {
        let (status, _) = send(
            &test.app,
            json_request(
                "POST",
                "/products",
                json!({"name": name, "price": 1.0, "userId": user}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, all) = send(&test.app, get_request("/products?userId=u1")).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn relational_update_rejects_partial_bodies() {
    let test = spawn_app(BackendKind::Relational, StubDirectory::with_users(&["u1"])).await;

    let (_, created) = send(
        &test.app,
        json_request(
            "POST",
            "/products",
            json!({"name": "Widget", "price": 9.99, "userId": "u1"}),
        ),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &test.app,
        json_request(
            "PUT",
            &format!("/products/{id}"),
            json!({"name": "Gadget", "userId": "u1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "name, price, userId required"}));

    let (status, updated) = send(
        &test.app,
        json_request(
            "PUT",
            &format!("/products/{id}"),
            json!({"name": "Gadget", "price": 19.99, "userId": "u1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Gadget");
    assert_eq!(updated["price"], 19.99);
}

#[tokio::test]
async fn delete_of_a_missing_product_is_not_found() {
    let test = spawn_app(BackendKind::Relational, StubDirectory::with_users(&["u1"])).await;

    let (status, body) = send(
        &test.app,
        Request::builder()
            .method("DELETE")
            .uri("/products/nope")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "product not found"}));
}

#[tokio::test]
async fn delete_answers_with_the_deleted_id() {
    let test = spawn_app(BackendKind::Relational, StubDirectory::with_users(&["u1"])).await;

    let (_, created) = send(
        &test.app,
        json_request(
            "POST",
            "/products",
            json!({"name": "Widget", "price": 9.99, "userId": "u1"}),
        ),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &test.app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/products/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": id}));
}

#[tokio::test]
async fn with_user_joins_the_owner() {
    let test = spawn_app(BackendKind::Relational, StubDirectory::with_users(&["u1"])).await;

    let (_, created) = send(
        &test.app,
        json_request(
            "POST",
            "/products",
            json!({"name": "Widget", "price": 9.99, "userId": "u1"}),
        ),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&test.app, get_request(&format!("/products/{id}/with-user"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["id"], *id);
    assert_eq!(body["user"]["id"], "u1");
    assert_eq!(body["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn document_backend_requires_the_partition_on_list() {
    let test = spawn_app(BackendKind::Document, StubDirectory::with_users(&[])).await;

    let (status, body) = send(&test.app, get_request("/products")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "userId is required"}));
}

#[tokio::test]
async fn document_backend_lists_one_partition_only() {
    let test = spawn_app(BackendKind::Document, StubDirectory::with_users(&[])).await;

    for (id, user) in [("1", "u1"), ("2", "u1"), ("3", "u2")] {
        let (status, _) = send(
            &test.app,
            json_request(
                "POST",
                "/products",
                json!({"id": id, "name": "Item", "price": 1.0, "userId": user}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, listed) = send(&test.app, get_request("/products?userId=u1")).await;
    assert_eq!(status, StatusCode::OK);
    let items = listed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|p| p["userId"] == "u1"));
}

#[tokio::test]
async fn document_backend_accepts_the_owner_header_fallback() {
    let test = spawn_app(BackendKind::Document, StubDirectory::with_users(&[])).await;

    let (status, listed) = send(
        &test.app,
        Request::builder()
            .uri("/products")
            .header("x-user-id", "u1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn document_create_never_consults_the_users_directory() {
    // A failing directory would turn any check into a 502; the document path
    // must not notice
    let test = spawn_app(BackendKind::Document, StubDirectory::failing()).await;

    let (status, created) = send(
        &test.app,
        json_request(
            "POST",
            "/products",
            json!({"id": 7, "name": "Widget", "price": "9.99", "userId": "ghost"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // Loose input is coerced: numeric id to string, string price to number
    assert_eq!(created["id"], "7");
    assert_eq!(created["price"], 9.99);
}

#[tokio::test]
async fn document_update_merges_omitted_fields() {
    let test = spawn_app(BackendKind::Document, StubDirectory::with_users(&[])).await;

    send(
        &test.app,
        json_request(
            "POST",
            "/products",
            json!({"id": "1", "name": "Widget", "price": 9.99, "userId": "u1"}),
        ),
    )
    .await;

    let (status, updated) = send(
        &test.app,
        json_request(
            "PUT",
            "/products/1",
            json!({"price": 12.5, "userId": "u1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Widget");
    assert_eq!(updated["price"], 12.5);
}

#[tokio::test]
async fn cosmos_surface_stays_reachable_with_relational_active() {
    let test = spawn_app(BackendKind::Relational, StubDirectory::with_users(&["u1"])).await;

    let (status, _) = send(
        &test.app,
        json_request(
            "POST",
            "/cosmos/products",
            json!({"id": "1", "name": "Side item", "price": 5.0, "userId": "u9"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, listed) = send(&test.app, get_request("/cosmos/products?userId=u9")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // The active relational surface is untouched by the side write
    let (_, main_list) = send(&test.app, get_request("/products")).await;
    assert_eq!(main_list, json!([]));
}

#[tokio::test]
async fn cosmos_delete_answers_no_content() {
    let test = spawn_app(BackendKind::Document, StubDirectory::with_users(&[])).await;

    send(
        &test.app,
        json_request(
            "POST",
            "/cosmos/products",
            json!({"id": "1", "name": "Widget", "price": 9.99, "userId": "u1"}),
        ),
    )
    .await;

    let (status, body) = send(
        &test.app,
        Request::builder()
            .method("DELETE")
            .uri("/cosmos/products/1?userId=u1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn cosmos_seed_fills_the_requested_partition() {
    let test = spawn_app(BackendKind::Document, StubDirectory::with_users(&[])).await;

    let (status, body) = send(
        &test.app,
        Request::builder()
            .method("POST")
            .uri("/cosmos/seed?userId=u2")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"], 5);
    assert_eq!(body["userId"], "u2");

    let (_, listed) = send(&test.app, get_request("/cosmos/products?userId=u2")).await;
    assert_eq!(listed.as_array().unwrap().len(), 5);
}
