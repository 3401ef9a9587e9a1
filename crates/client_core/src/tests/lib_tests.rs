use super::*;
use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::error::{ApiError, ErrorCode};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct CatalogServerState {
    seen_queries: Arc<Mutex<Vec<String>>>,
    body: Arc<Mutex<String>>,
    status: Arc<Mutex<StatusCode>>,
}

async fn handle_products(
    State(state): State<CatalogServerState>,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    state
        .seen_queries
        .lock()
        .await
        .push(query.unwrap_or_default());
    (*state.status.lock().await, state.body.lock().await.clone())
}

async fn spawn_catalog_server(
    body: &str,
    status: StatusCode,
) -> anyhow::Result<(String, CatalogServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = CatalogServerState {
        seen_queries: Arc::new(Mutex::new(Vec::new())),
        body: Arc::new(Mutex::new(body.to_string())),
        status: Arc::new(Mutex::new(status)),
    };
    let app = Router::new()
        .route("/products", get(handle_products))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn sample_products_json() -> &'static str {
    r#"[
        {
            "name": "Engagement Ring 1",
            "popularityScore": 0.85,
            "weight": 2.1,
            "price": 456.78,
            "images": { "yellow": "y1.jpg", "rose": "r1.jpg", "white": "w1.jpg" }
        },
        {
            "name": "Engagement Ring 2",
            "popularityScore": 0.51,
            "weight": 3.4,
            "price": 789.01,
            "images": { "yellow": "y2.jpg", "rose": "r2.jpg", "white": "w2.jpg" }
        }
    ]"#
}

#[tokio::test]
async fn passes_filter_bounds_through_unchanged_and_in_order() {
    let (server_url, state) = spawn_catalog_server(sample_products_json(), StatusCode::OK)
        .await
        .expect("spawn server");
    let client = CatalogClient::new(&server_url).expect("client");

    let query: FilterQuery = vec![
        ("min_popularity", "0.3".to_string()),
        ("max_popularity", "1".to_string()),
        ("min_price", "100.50".to_string()),
    ];
    let products = client.fetch_products(&query).await.expect("fetch");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Engagement Ring 1");

    let seen = state.seen_queries.lock().await.clone();
    assert_eq!(
        seen,
        vec!["min_popularity=0.3&max_popularity=1&min_price=100.50".to_string()]
    );
}

#[tokio::test]
async fn empty_query_sends_no_parameters() {
    let (server_url, state) = spawn_catalog_server("[]", StatusCode::OK)
        .await
        .expect("spawn server");
    let client = CatalogClient::new(&server_url).expect("client");

    let products = client.fetch_products(&Vec::new()).await.expect("fetch");
    assert!(products.is_empty());

    let seen = state.seen_queries.lock().await.clone();
    assert_eq!(seen, vec![String::new()]);
}

#[tokio::test]
async fn empty_array_is_a_valid_no_matches_response() {
    let (server_url, _state) = spawn_catalog_server("[]", StatusCode::OK)
        .await
        .expect("spawn server");
    let client = CatalogClient::new(&server_url).expect("client");

    let products = client.fetch_products(&Vec::new()).await.expect("fetch");
    assert!(products.is_empty());
}

#[tokio::test]
async fn malformed_response_surfaces_as_decode_error() {
    let (server_url, _state) = spawn_catalog_server(r#"{"not":"an array"}"#, StatusCode::OK)
        .await
        .expect("spawn server");
    let client = CatalogClient::new(&server_url).expect("client");

    let err = client
        .fetch_products(&Vec::new())
        .await
        .expect_err("must fail");
    assert!(matches!(err, CatalogError::Decode(_)), "got: {err:?}");
}

#[tokio::test]
async fn non_success_status_surfaces_service_error_payload() {
    let payload = ApiError::new(ErrorCode::Validation, "min_popularity must be within [0, 1]");
    let body = serde_json::to_string(&payload).expect("serialize");
    let (server_url, _state) = spawn_catalog_server(&body, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .expect("spawn server");
    let client = CatalogClient::new(&server_url).expect("client");

    let err = client
        .fetch_products(&vec![("min_popularity", "7".to_string())])
        .await
        .expect_err("must fail");
    match err {
        CatalogError::Rejected { status, message } => {
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(message, "min_popularity must be within [0, 1]");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_without_payload_still_fails_cleanly() {
    let (server_url, _state) = spawn_catalog_server("", StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .expect("spawn server");
    let client = CatalogClient::new(&server_url).expect("client");

    let err = client
        .fetch_products(&Vec::new())
        .await
        .expect_err("must fail");
    assert!(matches!(err, CatalogError::Rejected { .. }), "got: {err:?}");
}

#[test]
fn rejects_non_http_base_url() {
    let err = CatalogClient::new("ftp://catalog.example").expect_err("must fail");
    assert!(matches!(err, CatalogError::InvalidBaseUrl { .. }));

    let err = CatalogClient::new("not a url").expect_err("must fail");
    assert!(matches!(err, CatalogError::InvalidBaseUrl { .. }));
}

#[test]
fn products_url_tolerates_trailing_slash() {
    let client = CatalogClient::new("http://127.0.0.1:8000/").expect("client");
    assert_eq!(client.products_url(), "http://127.0.0.1:8000/products");
}
