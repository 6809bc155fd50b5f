use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Product, Sale};

/// Headline financial metrics for the dashboard, computed over a trailing
/// sales window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_revenue: Decimal,
    pub total_cogs: Decimal,
    pub gross_profit: Decimal,
    pub gross_margin_pct: f64,
    /// Current value of on-hand inventory at cost.
    pub inventory_value: Decimal,
    /// COGS over the window divided by current inventory value.
    pub inventory_turnover: f64,
    pub window_days: u32,
    pub generated_at: DateTime<Utc>,
}

/// Revenue attributed to one group (location or category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    pub name: String,
    pub amount: Decimal,
}

fn in_window(sale: &Sale, window_days: u32, now: DateTime<Utc>) -> bool {
    sale.date >= now - Duration::days(i64::from(window_days)) && sale.date <= now
}

/// Compute the dashboard headline metrics.
///
/// Item-level cost falls back to the catalog cost when the sale line did not
/// capture one.
pub fn dashboard_metrics(
    products: &[Product],
    sales: &[Sale],
    window_days: u32,
    now: DateTime<Utc>,
) -> DashboardMetrics {
    let catalog: HashMap<&str, &Product> =
        products.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut total_revenue = Decimal::ZERO;
    let mut total_cogs = Decimal::ZERO;
    for sale in sales.iter().filter(|s| in_window(s, window_days, now)) {
        total_revenue += sale.total_amount;
        for item in &sale.items {
            let unit_cost = item.cost.unwrap_or_else(|| {
                catalog
                    .get(item.product_id.as_str())
                    .map(|p| p.cost)
                    .unwrap_or(Decimal::ZERO)
            });
            total_cogs += unit_cost * Decimal::from(item.quantity);
        }
    }

    let gross_profit = total_revenue - total_cogs;
    let gross_margin_pct = if total_revenue > Decimal::ZERO {
        (gross_profit / total_revenue * Decimal::from(100))
            .to_f64()
            .unwrap_or(0.0)
    } else {
        0.0
    };

    let inventory_value: Decimal = products
        .iter()
        .map(|p| Decimal::from(p.total_stock()) * p.cost)
        .sum();
    let inventory_turnover = if inventory_value > Decimal::ZERO {
        (total_cogs / inventory_value).to_f64().unwrap_or(0.0)
    } else {
        0.0
    };

    DashboardMetrics {
        total_revenue,
        total_cogs,
        gross_profit,
        gross_margin_pct,
        inventory_value,
        inventory_turnover,
        window_days,
        generated_at: now,
    }
}

/// Windowed revenue grouped by location id, highest first.
pub fn sales_by_location(
    sales: &[Sale],
    window_days: u32,
    now: DateTime<Utc>,
) -> Vec<RevenueBreakdown> {
    let mut grouped: HashMap<String, Decimal> = HashMap::new();
    for sale in sales.iter().filter(|s| in_window(s, window_days, now)) {
        *grouped.entry(sale.location_id.clone()).or_insert(Decimal::ZERO) += sale.total_amount;
    }
    into_sorted_breakdown(grouped)
}

/// Windowed revenue grouped by product category, highest first. Items whose
/// product is missing from the catalog fall into "Uncategorized".
pub fn sales_by_category(
    products: &[Product],
    sales: &[Sale],
    window_days: u32,
    now: DateTime<Utc>,
) -> Vec<RevenueBreakdown> {
    let catalog: HashMap<&str, &Product> =
        products.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut grouped: HashMap<String, Decimal> = HashMap::new();
    for sale in sales.iter().filter(|s| in_window(s, window_days, now)) {
        for item in &sale.items {
            let category = catalog
                .get(item.product_id.as_str())
                .map(|p| p.category.clone())
                .unwrap_or_else(|| "Uncategorized".to_string());
            *grouped.entry(category).or_insert(Decimal::ZERO) +=
                item.price * Decimal::from(item.quantity);
        }
    }
    into_sorted_breakdown(grouped)
}

fn into_sorted_breakdown(grouped: HashMap<String, Decimal>) -> Vec<RevenueBreakdown> {
    let mut breakdown: Vec<RevenueBreakdown> = grouped
        .into_iter()
        .map(|(name, amount)| RevenueBreakdown { name, amount })
        .collect();
    // Name tie-break keeps the output deterministic for equal revenue.
    breakdown.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use crate::models::SaleItem;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn product(id: &str, category: &str, cost: Decimal, stock_qty: u32) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            sku: None,
            category: category.to_string(),
            price: dec!(20),
            cost,
            stock: std::collections::HashMap::from([("store-a".to_string(), stock_qty)]),
            min_stock_level: None,
            min_stock_thresholds: std::collections::HashMap::new(),
            expiry_date: None,
            last_sale_date: None,
            supplier: None,
        }
    }

    fn sale(
        product_id: &str,
        location_id: &str,
        qty: u32,
        price: Decimal,
        cost: Option<Decimal>,
        days_ago: i64,
    ) -> Sale {
        Sale {
            id: format!("s-{product_id}-{days_ago}"),
            date: now() - Duration::days(days_ago),
            location_id: location_id.to_string(),
            items: vec![SaleItem {
                product_id: product_id.to_string(),
                price,
                quantity: qty,
                cost,
            }],
            total_amount: price * Decimal::from(qty),
            total_tax: dec!(0),
        }
    }

    #[test]
    fn empty_snapshot_produces_zeroes() {
        let metrics = dashboard_metrics(&[], &[], 30, now());
        assert_eq!(metrics.total_revenue, dec!(0));
        assert_eq!(metrics.gross_margin_pct, 0.0);
        assert_eq!(metrics.inventory_turnover, 0.0);
    }

    #[test]
    fn revenue_and_cogs_respect_the_window() {
        let products = vec![product("p-1", "Grocery", dec!(10), 50)];
        let sales = vec![
            sale("p-1", "store-a", 5, dec!(20), Some(dec!(10)), 1),
            // Outside a 30-day window.
            sale("p-1", "store-a", 99, dec!(20), Some(dec!(10)), 40),
        ];
        let metrics = dashboard_metrics(&products, &sales, 30, now());
        assert_eq!(metrics.total_revenue, dec!(100));
        assert_eq!(metrics.total_cogs, dec!(50));
        assert_eq!(metrics.gross_profit, dec!(50));
        assert!((metrics.gross_margin_pct - 50.0).abs() < 1e-9);
        // 50 units at cost 10.
        assert_eq!(metrics.inventory_value, dec!(500));
        assert!((metrics.inventory_turnover - 0.1).abs() < 1e-9);
    }

    #[test]
    fn cogs_falls_back_to_catalog_cost() {
        let products = vec![product("p-1", "Grocery", dec!(12), 0)];
        let sales = vec![sale("p-1", "store-a", 2, dec!(20), None, 1)];
        let metrics = dashboard_metrics(&products, &sales, 30, now());
        assert_eq!(metrics.total_cogs, dec!(24));
    }

    #[test]
    fn location_breakdown_sorts_by_revenue() {
        let sales = vec![
            sale("p-1", "store-a", 1, dec!(20), None, 1),
            sale("p-1", "store-b", 5, dec!(20), None, 2),
        ];
        let breakdown = sales_by_location(&sales, 30, now());
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].name, "store-b");
        assert_eq!(breakdown[0].amount, dec!(100));
        assert_eq!(breakdown[1].name, "store-a");
    }

    #[test]
    fn category_breakdown_handles_unknown_products() {
        let products = vec![product("p-1", "Beverages", dec!(10), 0)];
        let sales = vec![
            sale("p-1", "store-a", 2, dec!(20), None, 1),
            sale("ghost", "store-a", 1, dec!(5), None, 1),
        ];
        let breakdown = sales_by_category(&products, &sales, 30, now());
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].name, "Beverages");
        assert_eq!(breakdown[0].amount, dec!(40));
        assert_eq!(breakdown[1].name, "Uncategorized");
        assert_eq!(breakdown[1].amount, dec!(5));
    }
}
