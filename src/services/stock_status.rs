use chrono::{DateTime, Duration, Utc};

use crate::models::{Product, Sale};

/// Most recent sale date of the product across the sales log.
pub fn last_sale_date(product_id: &str, sales: &[Sale]) -> Option<DateTime<Utc>> {
    sales
        .iter()
        .filter(|sale| sale.contains(product_id))
        .map(|sale| sale.date)
        .max()
}

/// Whether stocked inventory has gone `threshold_days` without a sale.
///
/// A product with zero total stock is never dead. A stocked product that has
/// never sold is always dead, regardless of how recently it was created —
/// `Product` carries no creation date that would allow an exclusion, so this
/// is a deliberate policy reproduction rather than an oversight.
pub fn is_dead_stock(
    product: &Product,
    sales: &[Sale],
    threshold_days: u32,
    now: DateTime<Utc>,
) -> bool {
    if product.total_stock() == 0 {
        return false;
    }
    match last_sale_date(&product.id, sales) {
        Some(last) => now.signed_duration_since(last) > Duration::days(i64::from(threshold_days)),
        None => true,
    }
}

/// Dead-stock check driven off the denormalized `last_sale_date` field
/// instead of the sales log, for callers that only hold the catalog.
pub fn is_dead_stock_product(product: &Product, threshold_days: u32, now: DateTime<Utc>) -> bool {
    if product.total_stock() == 0 {
        return false;
    }
    match product.last_sale_date {
        Some(last) => (now.date_naive() - last).num_days() > i64::from(threshold_days),
        None => true,
    }
}

/// Whether one location's holding sits below its effective reorder threshold.
/// Zero-quantity holdings are excluded; the stockout predicate covers those.
pub fn is_location_low_stock(
    product: &Product,
    location_id: &str,
    default_min: u32,
) -> bool {
    let qty = product.quantity_at(location_id);
    if qty == 0 {
        return false;
    }
    qty < product.effective_min_stock(location_id, default_min)
}

/// Whether ANY stocked location sits below its effective reorder threshold.
pub fn is_low_stock(product: &Product, default_min: u32) -> bool {
    product
        .stock
        .keys()
        .any(|location_id| is_location_low_stock(product, location_id, default_min))
}

/// Total stock across all locations is zero.
pub fn is_stockout(product: &Product) -> bool {
    product.total_stock() == 0
}

/// Expiry date is strictly in the future and within `threshold_days` of now.
pub fn is_expiring_soon(product: &Product, threshold_days: i64, now: DateTime<Utc>) -> bool {
    match product.expiry_date {
        Some(expiry) => {
            let days_to_expiry = (expiry - now.date_naive()).num_days();
            days_to_expiry > 0 && days_to_expiry <= threshold_days
        }
        None => false,
    }
}

/// Expiry date is at or before today. Products without one never expire.
pub fn is_expired(product: &Product, now: DateTime<Utc>) -> bool {
    match product.expiry_date {
        Some(expiry) => (expiry - now.date_naive()).num_days() <= 0,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    use crate::models::SaleItem;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn product(stock: &[(&str, u32)]) -> Product {
        Product {
            id: "p-1".into(),
            name: "Test Product".into(),
            sku: None,
            category: "Grocery".into(),
            price: dec!(20),
            cost: dec!(10),
            stock: stock
                .iter()
                .map(|(loc, qty)| (loc.to_string(), *qty))
                .collect(),
            min_stock_level: None,
            min_stock_thresholds: HashMap::new(),
            expiry_date: None,
            last_sale_date: None,
            supplier: None,
        }
    }

    fn sale_days_ago(product_id: &str, days_ago: i64) -> Sale {
        Sale {
            id: format!("s-{days_ago}"),
            date: now() - Duration::days(days_ago),
            location_id: "store-a".into(),
            items: vec![SaleItem {
                product_id: product_id.to_string(),
                price: dec!(20),
                quantity: 1,
                cost: None,
            }],
            total_amount: dec!(20),
            total_tax: dec!(0),
        }
    }

    #[test]
    fn zero_stock_is_never_dead() {
        let p = product(&[("store-a", 0)]);
        assert!(!is_dead_stock(&p, &[], 90, now()));
    }

    #[test]
    fn never_sold_stocked_product_is_dead() {
        let p = product(&[("store-a", 5)]);
        assert!(is_dead_stock(&p, &[], 90, now()));
    }

    #[test]
    fn recent_sale_keeps_stock_alive() {
        let p = product(&[("store-a", 5)]);
        let sales = vec![sale_days_ago("p-1", 89), sale_days_ago("p-1", 400)];
        assert!(!is_dead_stock(&p, &sales, 90, now()));
    }

    #[test]
    fn stale_sales_mean_dead_stock() {
        let p = product(&[("store-a", 5)]);
        let sales = vec![sale_days_ago("p-1", 91)];
        assert!(is_dead_stock(&p, &sales, 90, now()));
        // Sales of other products do not help.
        let sales = vec![sale_days_ago("p-other", 1)];
        assert!(is_dead_stock(&p, &sales, 90, now()));
    }

    #[test]
    fn dead_stock_product_uses_denormalized_date() {
        let mut p = product(&[("store-a", 5)]);
        assert!(is_dead_stock_product(&p, 90, now()));
        p.last_sale_date = Some(now().date_naive() - Duration::days(10));
        assert!(!is_dead_stock_product(&p, 90, now()));
        p.last_sale_date = Some(now().date_naive() - Duration::days(120));
        assert!(is_dead_stock_product(&p, 90, now()));
    }

    #[test]
    fn low_stock_uses_per_location_override() {
        let mut p = product(&[("store-a", 9), ("store-b", 9)]);
        assert!(is_low_stock(&p, 10));
        // Override store-a down; store-b still uses the default.
        p.min_stock_thresholds.insert("store-a".into(), 5);
        assert!(is_location_low_stock(&p, "store-b", 10));
        assert!(!is_location_low_stock(&p, "store-a", 10));
    }

    #[test]
    fn low_stock_falls_back_to_global_minimum() {
        let mut p = product(&[("store-a", 9)]);
        p.min_stock_level = Some(8);
        assert!(!is_low_stock(&p, 10));
        p.min_stock_level = None;
        assert!(is_low_stock(&p, 10));
    }

    #[test]
    fn zero_quantity_locations_are_not_low_stock() {
        let p = product(&[("store-a", 0)]);
        assert!(!is_low_stock(&p, 10));
        assert!(is_stockout(&p));
    }

    #[test]
    fn empty_stock_map_is_stockout_not_low_stock() {
        let p = product(&[]);
        assert!(!is_low_stock(&p, 10));
        assert!(is_stockout(&p));
    }

    #[test]
    fn expiry_predicates_split_on_today() {
        let mut p = product(&[("store-a", 5)]);
        assert!(!is_expired(&p, now()));
        assert!(!is_expiring_soon(&p, 30, now()));

        p.expiry_date = Some(now().date_naive());
        assert!(is_expired(&p, now()));
        assert!(!is_expiring_soon(&p, 30, now()));

        p.expiry_date = Some(now().date_naive() + Duration::days(1));
        assert!(!is_expired(&p, now()));
        assert!(is_expiring_soon(&p, 30, now()));

        p.expiry_date = Some(now().date_naive() + Duration::days(31));
        assert!(!is_expiring_soon(&p, 30, now()));
    }
}
