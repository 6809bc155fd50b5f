use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::config::AnalyticsSettings;
use crate::models::{Product, Sale, StockHealth, StockHealthStatus};
use crate::services::stock_status::is_dead_stock;

/// Sentinel cover value for stocked products with no measurable demand.
///
/// Kept as a finite value rather than an explicit unbounded marker so the
/// downstream band comparisons (`> 60`, `< 14`, …) stay total.
pub const UNBOUNDED_COVER_DAYS: f64 = 999.0;

/// Average units of `product_id` sold per day over the trailing window
/// `[now - window_days, now]` (inclusive). Zero when nothing sold in window.
pub fn demand_velocity(
    product_id: &str,
    sales: &[Sale],
    window_days: u32,
    now: DateTime<Utc>,
) -> f64 {
    if window_days == 0 {
        return 0.0;
    }
    let window_start = now - Duration::days(i64::from(window_days));
    let total_qty: u32 = sales
        .iter()
        .filter(|sale| sale.date >= window_start && sale.date <= now)
        .map(|sale| sale.quantity_of(product_id))
        .sum();
    f64::from(total_qty) / f64::from(window_days)
}

/// Demand velocity restricted to sales recorded at one location.
pub fn location_velocity(
    product_id: &str,
    sales: &[Sale],
    location_id: &str,
    window_days: u32,
    now: DateTime<Utc>,
) -> f64 {
    if window_days == 0 {
        return 0.0;
    }
    let window_start = now - Duration::days(i64::from(window_days));
    let total_qty: u32 = sales
        .iter()
        .filter(|sale| sale.location_id == location_id)
        .filter(|sale| sale.date >= window_start && sale.date <= now)
        .map(|sale| sale.quantity_of(product_id))
        .sum();
    f64::from(total_qty) / f64::from(window_days)
}

/// Days of cover = stock / velocity. A stocked product with no demand gets
/// the unbounded sentinel; an empty, demandless holding is zero.
pub fn inventory_cover(stock_qty: u32, velocity: f64) -> f64 {
    if velocity <= 0.0 {
        if stock_qty > 0 {
            UNBOUNDED_COVER_DAYS
        } else {
            0.0
        }
    } else {
        f64::from(stock_qty) / velocity
    }
}

/// Days since the last movement relative to the cover window. Zero when no
/// movement date is known.
pub fn aging_score(last_movement: Option<NaiveDate>, cover_days: f64, now: DateTime<Utc>) -> f64 {
    let Some(moved) = last_movement else {
        return 0.0;
    };
    let days_since = (now.date_naive() - moved).num_days() as f64;
    let safe_cover = if cover_days == 0.0 { 1.0 } else { cover_days };
    days_since / safe_cover
}

/// Band cover-days into Overstock / Stockout Risk / Healthy.
///
/// Overstock is checked first; the bands cannot overlap while
/// `2 * optimal_cover_days >= safety_stock_days`, which settings validation
/// enforces.
pub fn classify_health(
    cover_days: f64,
    optimal_cover_days: f64,
    safety_stock_days: f64,
) -> StockHealthStatus {
    if cover_days > 2.0 * optimal_cover_days {
        StockHealthStatus::Overstock
    } else if cover_days < safety_stock_days {
        StockHealthStatus::StockoutRisk
    } else {
        StockHealthStatus::Healthy
    }
}

/// Full stock-health assessment for one product: velocity, cover, aging and
/// the classification, with dead stock taking precedence over the cover bands.
pub fn assess_stock_health(
    product: &Product,
    sales: &[Sale],
    settings: &AnalyticsSettings,
    now: DateTime<Utc>,
) -> StockHealth {
    let velocity = demand_velocity(&product.id, sales, settings.velocity_window_days, now);
    let cover_days = inventory_cover(product.total_stock(), velocity);
    let status = if is_dead_stock(product, sales, settings.dead_stock_threshold_days, now) {
        StockHealthStatus::DeadStock
    } else {
        classify_health(
            cover_days,
            settings.optimal_cover_days,
            settings.safety_stock_days,
        )
    };
    StockHealth {
        status,
        cover_days,
        aging_score: aging_score(product.last_sale_date, cover_days, now),
    }
}
