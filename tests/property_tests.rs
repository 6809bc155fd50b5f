//! Property-based checks over randomly generated snapshots: the engine's
//! caps, orderings and band classifications must hold for any input, not
//! just the curated scenarios.

mod common;

use chrono::Duration;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use common::fixed_now;
use inventory_analytics::services::{alerts, insights, velocity};
use inventory_analytics::{AnalyticsSettings, Product, Sale, SaleItem, StockHealthStatus};

fn arb_products(max: usize) -> impl Strategy<Value = Vec<Product>> {
    // (price, cost, warehouse qty, store qty) per product; ids are assigned
    // by position so they stay unique.
    prop::collection::vec((1u32..200, 0u32..200, 0u32..400, 0u32..400), 0..max).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (price, cost, wh_qty, store_qty))| Product {
                    id: format!("p-{i}"),
                    name: format!("Product {i}"),
                    sku: None,
                    category: "Grocery".into(),
                    price: Decimal::from(price),
                    cost: Decimal::from(cost),
                    stock: HashMap::from([
                        ("warehouse-a".to_string(), wh_qty),
                        ("store-b".to_string(), store_qty),
                    ]),
                    min_stock_level: None,
                    min_stock_thresholds: HashMap::new(),
                    expiry_date: None,
                    last_sale_date: None,
                    supplier: None,
                })
                .collect()
        },
    )
}

fn arb_sales(max_product: usize, max: usize) -> impl Strategy<Value = Vec<Sale>> {
    prop::collection::vec(
        (0..max_product, 1u32..30, 0i64..120, prop::bool::ANY),
        0..max,
    )
    .prop_map(move |specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (product_idx, qty, days_ago, at_store))| {
                let location = if at_store { "store-b" } else { "warehouse-a" };
                Sale {
                    id: format!("s-{i}"),
                    date: fixed_now() - Duration::days(days_ago),
                    location_id: location.to_string(),
                    items: vec![SaleItem {
                        product_id: format!("p-{product_idx}"),
                        price: dec!(20),
                        quantity: qty,
                        cost: None,
                    }],
                    total_amount: dec!(20) * Decimal::from(qty),
                    total_tax: dec!(0),
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn health_classification_is_total_and_band_consistent(cover in 0.0f64..2000.0) {
        let status = velocity::classify_health(cover, 30.0, 7.0);
        match status {
            StockHealthStatus::Overstock => prop_assert!(cover > 60.0),
            StockHealthStatus::StockoutRisk => prop_assert!(cover < 7.0),
            StockHealthStatus::Healthy => prop_assert!((7.0..=60.0).contains(&cover)),
            StockHealthStatus::DeadStock => prop_assert!(false, "banding never yields dead stock"),
        }
    }

    #[test]
    fn cover_is_non_negative_and_exact_under_demand(
        stock in 0u32..100_000,
        vel in 0.01f64..500.0,
    ) {
        let cover = velocity::inventory_cover(stock, vel);
        prop_assert!(cover >= 0.0);
        prop_assert!((cover - f64::from(stock) / vel).abs() < 1e-6);
    }

    #[test]
    fn velocity_never_exceeds_window_volume(sales in arb_sales(5, 40)) {
        let vel = velocity::demand_velocity("p-0", &sales, 30, fixed_now());
        let total: u32 = sales
            .iter()
            .map(|s| s.quantity_of("p-0"))
            .sum();
        prop_assert!(vel >= 0.0);
        prop_assert!(vel <= f64::from(total) / 30.0 + 1e-9);
    }

    #[test]
    fn insights_respect_cap_dedup_and_ordering(
        products in arb_products(15),
        sales in arb_sales(15, 60),
    ) {
        let settings = AnalyticsSettings::default();
        let roster = vec!["warehouse-a".to_string(), "store-b".to_string()];
        let result = insights::generate_insights(&products, &sales, &roster, &settings, fixed_now());

        prop_assert!(result.len() <= settings.max_insights);

        let mut ids: Vec<&str> = result.iter().map(|i| i.metadata.product_id.as_str()).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        prop_assert_eq!(before, ids.len(), "one insight per product");

        for pair in result.windows(2) {
            prop_assert!(
                pair[0].insight_type.priority() >= pair[1].insight_type.priority(),
                "insights sorted by priority"
            );
        }
    }

    #[test]
    fn alerts_respect_cap_priorities_and_ordering(products in arb_products(20)) {
        let settings = AnalyticsSettings::default();
        let result = alerts::generate_alerts(&products, &settings, fixed_now());

        prop_assert!(result.len() <= settings.max_alerts);
        for alert in &result {
            prop_assert!(alert.priority == 2 || alert.priority == 3);
        }
        for pair in result.windows(2) {
            prop_assert!(pair[0].priority >= pair[1].priority);
        }
    }
}
