use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{
    domain::Product,
    error::{ApiError, ErrorCode},
};
use tracing::info;

mod catalog;
mod config;

use catalog::{load_catalog, ProductFilter, StoredProduct};
use config::load_settings;

#[derive(Clone)]
struct AppState {
    catalog: Arc<Vec<StoredProduct>>,
    gold_price_usd: f64,
}

#[derive(Debug, Deserialize)]
struct ProductsQuery {
    min_popularity: Option<f64>,
    max_popularity: Option<f64>,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let catalog = load_catalog(&PathBuf::from(&settings.catalog_path))?;
    info!(
        products = catalog.len(),
        path = %settings.catalog_path,
        "catalog loaded"
    );

    let state = AppState {
        catalog: Arc::new(catalog),
        gold_price_usd: settings.gold_price_usd,
    };
    let app = build_router(state);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "catalog service listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/products", get(list_products))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<Product>>, (StatusCode, Json<ApiError>)> {
    let filter = validate_query(&query).map_err(|message| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::new(ErrorCode::Validation, message)),
        )
    })?;

    let products: Vec<Product> = state
        .catalog
        .iter()
        .map(|entry| entry.priced(state.gold_price_usd))
        .filter(|product| filter.matches(product))
        .collect();
    Ok(Json(products))
}

fn validate_query(query: &ProductsQuery) -> Result<ProductFilter, String> {
    for (name, value) in [
        ("min_popularity", query.min_popularity),
        ("max_popularity", query.max_popularity),
    ] {
        if let Some(value) = value {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be within [0, 1]"));
            }
        }
    }
    for (name, value) in [("min_price", query.min_price), ("max_price", query.max_price)] {
        if let Some(value) = value {
            if value < 0.0 {
                return Err(format!("{name} must not be negative"));
            }
        }
    }
    Ok(ProductFilter {
        min_popularity: query.min_popularity,
        max_popularity: query.max_popularity,
        min_price: query.min_price,
        max_price: query.max_price,
    })
}
