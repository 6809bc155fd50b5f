//! Shared fixtures for the integration suites: a fixed clock and snapshot
//! builders so scenarios stay deterministic.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Once;

use inventory_analytics::{Product, Sale, SaleItem};

static TRACING: Once = Once::new();

/// Install a test subscriber once per process so `RUST_LOG` controls the
/// engine's tracing output during test runs.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The instant every scenario is evaluated at.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn roster() -> Vec<String> {
    vec!["warehouse-a".into(), "store-b".into(), "store-c".into()]
}

pub fn product(id: &str, price: Decimal, cost: Decimal, stock: &[(&str, u32)]) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        sku: Some(format!("SKU-{id}")),
        category: "Grocery".into(),
        price,
        cost,
        stock: stock
            .iter()
            .map(|(loc, qty)| (loc.to_string(), *qty))
            .collect(),
        min_stock_level: None,
        min_stock_thresholds: HashMap::new(),
        expiry_date: None,
        last_sale_date: None,
        supplier: Some("Acme Wholesale".into()),
    }
}

pub fn sale_at(product_id: &str, location_id: &str, qty: u32, days_ago: i64) -> Sale {
    let price = dec!(50);
    Sale {
        id: format!("s-{product_id}-{location_id}-{days_ago}"),
        date: fixed_now() - Duration::days(days_ago),
        location_id: location_id.to_string(),
        items: vec![SaleItem {
            product_id: product_id.to_string(),
            price,
            quantity: qty,
            cost: None,
        }],
        total_amount: price * Decimal::from(qty),
        total_tax: dec!(0),
    }
}

/// One sale of `qty_per_day` units per day for the trailing `days` days.
pub fn steady_sales(product_id: &str, location_id: &str, days: i64, qty_per_day: u32) -> Vec<Sale> {
    (1..=days)
        .map(|d| sale_at(product_id, location_id, qty_per_day, d))
        .collect()
}
