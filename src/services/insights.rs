use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::AnalyticsSettings;
use crate::models::{ActionType, InsightMetadata, InsightType, Product, Sale, StrategicInsight};
use crate::services::stock_status::{is_dead_stock, last_sale_date};
use crate::services::transfers::find_transfer_opportunities;
use crate::services::velocity::{demand_velocity, inventory_cover};

// Rule thresholds for the per-product checks. These bands are part of the
// engine contract rather than deployment tuning, so they stay constants.
const REORDER_COVER_DAYS: f64 = 14.0;
const MIN_REORDER_VELOCITY: f64 = 0.2;
const REORDER_HORIZON_DAYS: f64 = 30.0;
const HIGH_VELOCITY: f64 = 0.5;
const LOW_MARGIN: f64 = 0.10;
const SLOW_VELOCITY: f64 = 0.1;
const SLOW_MOVER_MIN_STOCK: u32 = 10;
const HIGH_MARGIN: f64 = 0.40;
const GROWTH_VELOCITY: f64 = 1.0;
const GROWTH_COVER_DAYS: f64 = 20.0;
const GROWTH_REORDER_HORIZON_DAYS: f64 = 45.0;

/// Generate the deduplicated, prioritized recommendation list for the
/// current snapshot.
///
/// Each rule contributes at most one candidate per product; the reducer then
/// keeps the single most actionable insight per product id, sorts by type
/// priority and truncates to the configured cap. The cap and the
/// one-insight-per-product rule are deliberate UX constraints, not
/// limitations.
pub fn generate_insights(
    products: &[Product],
    sales: &[Sale],
    locations: &[String],
    settings: &AnalyticsSettings,
    now: DateTime<Utc>,
) -> Vec<StrategicInsight> {
    let mut candidates = find_transfer_opportunities(products, sales, locations, settings, now);

    for product in products {
        let velocity = demand_velocity(&product.id, sales, settings.velocity_window_days, now);
        let total_stock = product.total_stock();
        let cover_days = inventory_cover(total_stock, velocity);
        let margin = product.margin_ratio();
        let dead = is_dead_stock(product, sales, settings.dead_stock_threshold_days, now);

        if dead {
            if let Some(insight) = liquidation_insight(product, sales, total_stock, settings, now)
            {
                candidates.push(insight);
            }
        }

        if cover_days < REORDER_COVER_DAYS && velocity > MIN_REORDER_VELOCITY && total_stock > 0 {
            let reorder_qty = (velocity * REORDER_HORIZON_DAYS).ceil() as u32;
            candidates.push(StrategicInsight {
                id: format!("reorder-{}", product.id),
                insight_type: InsightType::RiskMitigation,
                problem: format!("Stockout Risk: {}", product.name),
                impact: format!(
                    "Only {} days inventory remaining",
                    cover_days.floor() as i64
                ),
                recommended_action: format!("Restock {reorder_qty} units immediately"),
                roi_impact: "Protect Revenue".to_string(),
                confidence_score: 0.95,
                action_type: ActionType::Reorder,
                metadata: InsightMetadata {
                    reorder_qty: Some(reorder_qty),
                    ..InsightMetadata::for_product(product.id.clone())
                },
            });
        }

        if velocity > HIGH_VELOCITY {
            if margin < LOW_MARGIN {
                let monthly_gain = (velocity
                    * REORDER_HORIZON_DAYS
                    * product.price.to_f64().unwrap_or(0.0)
                    * 0.05)
                    .floor() as i64;
                candidates.push(StrategicInsight {
                    id: format!("price-margin-{}", product.id),
                    insight_type: InsightType::ProfitOptimization,
                    problem: format!("Low Margin on High Vol: {}", product.name),
                    impact: format!("Margin is only {:.1}%", margin * 100.0),
                    recommended_action: "Increase price by 5-10% to improve profitability"
                        .to_string(),
                    roi_impact: format!("+₹{monthly_gain} / mo"),
                    confidence_score: 0.8,
                    action_type: ActionType::PriceAdjust,
                    metadata: InsightMetadata::for_product(product.id.clone()),
                });
            }
        } else if velocity < SLOW_VELOCITY
            && total_stock > SLOW_MOVER_MIN_STOCK
            && margin > HIGH_MARGIN
            && !dead
        {
            candidates.push(StrategicInsight {
                id: format!("price-elasticity-{}", product.id),
                insight_type: InsightType::Growth,
                problem: format!("Slow Mover (High Margin): {}", product.name),
                impact: "High price may be limiting sales volume".to_string(),
                recommended_action: "Lower price by 10% to boost velocity".to_string(),
                roi_impact: "Volume Growth".to_string(),
                confidence_score: 0.75,
                action_type: ActionType::PriceAdjust,
                metadata: InsightMetadata::for_product(product.id.clone()),
            });
        }

        if velocity > GROWTH_VELOCITY && cover_days > GROWTH_COVER_DAYS {
            candidates.push(StrategicInsight {
                id: format!("growth-{}", product.id),
                insight_type: InsightType::Growth,
                problem: format!("High Demand Item: {}", product.name),
                impact: format!("Selling {velocity:.1} units/day consistently"),
                recommended_action: "Ensure continuous supply & consider bulk buy".to_string(),
                roi_impact: "Maximize Sales".to_string(),
                confidence_score: 0.9,
                action_type: ActionType::Reorder,
                metadata: InsightMetadata {
                    reorder_qty: Some((velocity * GROWTH_REORDER_HORIZON_DAYS).ceil() as u32),
                    ..InsightMetadata::for_product(product.id.clone())
                },
            });
        }
    }

    debug!(candidates = candidates.len(), "insight candidates before dedup");
    let mut insights = dedup_by_product(candidates);
    insights.sort_by(|a, b| b.insight_type.priority().cmp(&a.insight_type.priority()));
    insights.truncate(settings.max_insights);
    insights
}

/// Keep the single highest-priority insight per product id.
///
/// Candidates are folded in order through the type-priority comparator; on a
/// tie the earlier candidate wins, preserving generation order. Exposed for
/// direct testing independent of the rule set.
pub fn dedup_by_product(candidates: Vec<StrategicInsight>) -> Vec<StrategicInsight> {
    let mut order: Vec<String> = Vec::new();
    let mut best: HashMap<String, StrategicInsight> = HashMap::new();

    for candidate in candidates {
        match best.entry(candidate.metadata.product_id.clone()) {
            Entry::Vacant(slot) => {
                order.push(candidate.metadata.product_id.clone());
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.insight_type.priority() > slot.get().insight_type.priority() {
                    slot.insert(candidate);
                }
            }
        }
    }

    order
        .iter()
        .filter_map(|product_id| best.remove(product_id))
        .collect()
}

fn liquidation_insight(
    product: &Product,
    sales: &[Sale],
    total_stock: u32,
    settings: &AnalyticsSettings,
    now: DateTime<Utc>,
) -> Option<StrategicInsight> {
    let capital_blocked = Decimal::from(total_stock) * product.cost;
    if capital_blocked <= settings.min_blocked_capital {
        return None;
    }

    let time_text = match last_sale_date(&product.id, sales) {
        Some(last) => {
            let days_since = now.signed_duration_since(last).num_days();
            if days_since > 365 {
                "over a year".to_string()
            } else {
                format!("{days_since} days ago")
            }
        }
        None => "over a year".to_string(),
    };
    let recovery = (capital_blocked * dec!(0.7)).floor().to_i64().unwrap_or(0);

    Some(StrategicInsight {
        id: format!("deadstock-{}", product.id),
        insight_type: InsightType::CashFlow,
        problem: format!("Dead Stock: {}", product.name),
        impact: format!("₹{capital_blocked} stuck. Last sold {time_text}."),
        recommended_action: format!("Liquidate {total_stock} units. Run clearance sale."),
        roi_impact: format!("Recover ~₹{recovery}"),
        confidence_score: 0.85,
        action_type: ActionType::Liquidate,
        metadata: InsightMetadata {
            current_stock: Some(total_stock),
            ..InsightMetadata::for_product(product.id.clone())
        },
    })
}
