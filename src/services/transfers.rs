use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::AnalyticsSettings;
use crate::models::{ActionType, InsightMetadata, InsightType, Product, Sale, StrategicInsight};
use crate::services::velocity::{inventory_cover, location_velocity};

/// Per-location demand snapshot for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationStat {
    pub location_id: String,
    pub stock: u32,
    pub velocity: f64,
    pub cover_days: f64,
}

/// Stock, local velocity and cover for a product at each active location.
pub fn location_stats(
    product: &Product,
    sales: &[Sale],
    locations: &[String],
    settings: &AnalyticsSettings,
    now: DateTime<Utc>,
) -> Vec<LocationStat> {
    locations
        .iter()
        .map(|location_id| {
            let stock = product.quantity_at(location_id);
            let velocity = location_velocity(
                &product.id,
                sales,
                location_id,
                settings.velocity_window_days,
                now,
            );
            LocationStat {
                location_id: location_id.clone(),
                stock,
                velocity,
                cover_days: inventory_cover(stock, velocity),
            }
        })
        .collect()
}

/// Match overstocked locations to under-supplied ones and propose transfers
/// that clear the economic gate (margin gain above flat fee + per-unit
/// handling).
///
/// `locations` is the caller's active roster for the tenant; the optimizer
/// never assumes a fixed location set.
pub fn find_transfer_opportunities(
    products: &[Product],
    sales: &[Sale],
    locations: &[String],
    settings: &AnalyticsSettings,
    now: DateTime<Utc>,
) -> Vec<StrategicInsight> {
    let transfer = &settings.transfer;
    let mut insights = Vec::new();

    for product in products {
        let stats = location_stats(product, sales, locations, settings, now);
        let overstocked: Vec<&LocationStat> = stats
            .iter()
            .filter(|stat| stat.cover_days > transfer.overstock_cover_days)
            .collect();
        let starving: Vec<&LocationStat> = stats
            .iter()
            .filter(|stat| {
                stat.cover_days < transfer.starving_cover_days
                    && stat.velocity > transfer.min_target_velocity
            })
            .collect();

        for source in &overstocked {
            for target in &starving {
                if source.stock <= transfer.min_source_stock {
                    continue;
                }
                // Move at most half the excess, capped at what brings the
                // target up to its cover goal.
                let qty = (f64::from(source.stock) * 0.5)
                    .min((transfer.target_cover_days - target.cover_days) * target.velocity)
                    .floor();
                if qty <= 0.0 {
                    continue;
                }
                let qty = qty as u32;

                let unit_margin = product.price - product.cost;
                let estimated_gain = unit_margin * Decimal::from(qty);
                let transfer_cost =
                    Decimal::from(transfer.base_fee + transfer.unit_handling_fee * qty);
                if estimated_gain <= transfer_cost {
                    debug!(
                        product_id = %product.id,
                        from = %source.location_id,
                        to = %target.location_id,
                        qty,
                        "transfer skipped, gain does not clear cost"
                    );
                    continue;
                }
                let net_gain = (estimated_gain - transfer_cost)
                    .floor()
                    .to_i64()
                    .unwrap_or(0);

                insights.push(StrategicInsight {
                    id: format!(
                        "transfer-{}-{}-{}",
                        product.id, source.location_id, target.location_id
                    ),
                    insight_type: InsightType::ProfitOptimization,
                    problem: format!("Stock imbalance for {}", product.name),
                    impact: format!("Potential missed sales in {}", target.location_id),
                    recommended_action: format!(
                        "Transfer {} units from {} to {}",
                        qty, source.location_id, target.location_id
                    ),
                    roi_impact: format!("+₹{net_gain}"),
                    confidence_score: 0.9,
                    action_type: ActionType::Transfer,
                    metadata: InsightMetadata {
                        from: Some(source.location_id.clone()),
                        to: Some(target.location_id.clone()),
                        qty: Some(qty),
                        ..InsightMetadata::for_product(product.id.clone())
                    },
                });
            }
        }
    }

    insights
}
