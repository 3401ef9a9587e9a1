//! Stored catalog entries and the pricing/filtering applied when serving them.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use shared::domain::{Product, VariantImages};

/// A catalog entry as stored on disk: everything but the price, which is
/// computed per request from the configured gold quote.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProduct {
    pub name: String,
    pub popularity_score: f64,
    pub weight: f64,
    pub images: VariantImages,
}

impl StoredProduct {
    pub fn priced(&self, gold_price_usd: f64) -> Product {
        Product {
            name: self.name.clone(),
            popularity_score: self.popularity_score,
            weight: self.weight,
            price: price_usd(self.popularity_score, self.weight, gold_price_usd),
            images: self.images.clone(),
        }
    }
}

pub fn price_usd(popularity_score: f64, weight: f64, gold_price_usd: f64) -> f64 {
    (popularity_score + 1.0) * weight * gold_price_usd
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<StoredProduct>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file '{}'", path.display()))?;
    let products: Vec<StoredProduct> = serde_json::from_str(&raw)
        .with_context(|| format!("catalog file '{}' is not valid", path.display()))?;
    Ok(products)
}

/// Resolved (already validated) filter bounds. `None` imposes no bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub min_popularity: Option<f64>,
    pub max_popularity: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(min) = self.min_popularity {
            if product.popularity_score < min {
                return false;
            }
        }
        if let Some(max) = self.max_popularity {
            if product.popularity_score > max {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        true
    }
}
