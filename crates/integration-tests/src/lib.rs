//! Integration tests for Stay Young.
//!
//! Each test starts an in-process fake of the Stay Young REST API and serves
//! the real storefront or admin router against it on an ephemeral port.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stay-young-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Slug of the one product the fake API knows.
pub const PRODUCT_SLUG: &str = "rice-toner";
/// Id of the one product the fake API knows.
pub const PRODUCT_ID: &str = "650a1f0c2b9e4d0012ab34cd";
/// Product name that makes the fake API reject writes with a message.
pub const DUPLICATE_NAME: &str = "Duplicate Toner";

/// A write request the fake API received.
#[derive(Debug, Clone)]
pub struct RecordedWrite {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// Handle to a running fake REST API.
#[derive(Clone)]
pub struct FakeApi {
    pub url: String,
    writes: Arc<Mutex<Vec<RecordedWrite>>>,
}

impl FakeApi {
    /// Writes received so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().expect("writes lock poisoned").clone()
    }
}

/// JSON record for the fake API's product.
#[must_use]
pub fn sample_product() -> Value {
    json!({
        "_id": PRODUCT_ID,
        "name": "Rice Toner",
        "subName": "Milky toner for glowing skin",
        "slug": PRODUCT_SLUG,
        "category": ["c1"],
        "detailTags": ["CRUELTY_FREE", "VEGAN_FRIENDLY"],
        "images": ["https://cdn.example.com/rice-toner-1.jpg"],
        "price": 1200,
        "discountedPrice": 999,
        "stockAvailable": 40,
        "description": "A milky toner with 77% rice extract."
    })
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "Product not found"})),
    )
        .into_response()
}

async fn list_products() -> Json<Value> {
    Json(json!([sample_product()]))
}

async fn product_by_slug(Path(slug): Path<String>) -> Response {
    if slug == PRODUCT_SLUG {
        Json(sample_product()).into_response()
    } else {
        not_found()
    }
}

async fn product_by_id(Path(id): Path<String>) -> Response {
    if id == PRODUCT_ID {
        Json(sample_product()).into_response()
    } else {
        not_found()
    }
}

async fn list_categories() -> Json<Value> {
    Json(json!([
        {"_id": "c1", "name": "toner"},
        {"_id": "c2", "name": "serum"}
    ]))
}

async fn record_write(
    State(writes): State<Arc<Mutex<Vec<RecordedWrite>>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let duplicate = body.get("name").and_then(Value::as_str) == Some(DUPLICATE_NAME);

    writes
        .lock()
        .expect("writes lock poisoned")
        .push(RecordedWrite {
            method,
            path: uri.path().to_owned(),
            authorization: authorization.clone(),
            body,
        });

    if authorization.is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        )
            .into_response();
    }
    if duplicate {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "Product with this name already exists"})),
        )
            .into_response();
    }
    (StatusCode::OK, Json(json!({"success": true}))).into_response()
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Test server failed");
    });
    addr
}

/// Start the fake REST API.
pub async fn spawn_fake_api() -> FakeApi {
    let writes = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/api/product", get(list_products).post(record_write))
        .route("/api/product/slug/{slug}", get(product_by_slug))
        .route(
            "/api/product/{id}",
            get(product_by_id).patch(record_write).delete(record_write),
        )
        .route("/api/category", get(list_categories))
        .with_state(Arc::clone(&writes));

    let addr = serve(router).await;
    FakeApi {
        url: format!("http://{addr}/api"),
        writes,
    }
}

/// Serve the storefront against `api` and return its base URL.
pub async fn spawn_storefront(api: &FakeApi) -> String {
    use stay_young_storefront::config::{ApiConfig, StorefrontConfig};

    let config = StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid IP"),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        api: ApiConfig::new(&api.url).expect("valid API URL"),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    };
    let state = stay_young_storefront::state::AppState::new(config).expect("storefront state");
    let addr = serve(stay_young_storefront::app(state)).await;
    format!("http://{addr}")
}

/// Serve the admin panel against `api` and return its base URL.
pub async fn spawn_admin(api: &FakeApi) -> String {
    spawn_admin_for(&api.url).await
}

/// Serve the admin panel against any API base URL.
pub async fn spawn_admin_for(api_url: &str) -> String {
    use stay_young_admin::config::{AdminConfig, ApiConfig};

    let config = AdminConfig {
        host: "127.0.0.1".parse().expect("valid IP"),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        api: ApiConfig::new(api_url).expect("valid API URL"),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    };
    let state = stay_young_admin::state::AppState::new(config).expect("admin state");
    let addr = serve(stay_young_admin::app(state)).await;
    format!("http://{addr}")
}

/// A base URL on which nothing is listening.
pub async fn unreachable_api_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{addr}/api")
}

/// HTTP client that keeps cookies and follows redirects.
#[must_use]
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
