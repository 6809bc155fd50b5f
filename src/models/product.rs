use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product with per-location stock levels.
///
/// Read-only input to the engine; ownership and lifecycle belong to the
/// surrounding data layer. Stock quantities are unsigned and money fields are
/// `Decimal`, so negative stock and NaN money arithmetic are unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub category: String,
    /// Sale price per unit.
    pub price: Decimal,
    /// Unit cost.
    pub cost: Decimal,
    /// Location id -> on-hand quantity.
    #[serde(default)]
    pub stock: HashMap<String, u32>,
    /// Global reorder threshold; absent means the engine default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock_level: Option<u32>,
    /// Per-location overrides for the reorder threshold.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub min_stock_thresholds: HashMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    /// Denormalized most-recent-sale date maintained by the data layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sale_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

impl Product {
    /// Total on-hand quantity across all locations.
    pub fn total_stock(&self) -> u32 {
        self.stock.values().sum()
    }

    /// On-hand quantity at one location; unknown locations hold zero.
    pub fn quantity_at(&self, location_id: &str) -> u32 {
        self.stock.get(location_id).copied().unwrap_or(0)
    }

    /// Effective reorder threshold for a location: per-location override,
    /// else the product-level minimum, else `default_min`.
    pub fn effective_min_stock(&self, location_id: &str, default_min: u32) -> u32 {
        self.min_stock_thresholds
            .get(location_id)
            .copied()
            .unwrap_or_else(|| self.min_stock_level.unwrap_or(default_min))
    }

    /// Gross margin ratio `(price - cost) / price`, or 0 when the price is zero.
    pub fn margin_ratio(&self) -> f64 {
        if self.price > Decimal::ZERO {
            ((self.price - self.cost) / self.price)
                .to_f64()
                .unwrap_or(0.0)
        } else {
            0.0
        }
    }
}
