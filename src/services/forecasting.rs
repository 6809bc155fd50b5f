use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{HistoryPoint, Product, ProductForecast, Sale, Trend};

const CURRENT_PERIOD_DAYS: i64 = 30;
const HISTORY_DAYS: i64 = 60;
const HIGH_GROWTH_RATE: f64 = 20.0;
const DECLINING_RATE: f64 = -20.0;
const HIGH_GROWTH_MOMENTUM: f64 = 1.2;
const DECLINING_MOMENTUM: f64 = 0.9;

/// Fixed placeholder until a real confidence interval replaces it; part of
/// the output contract.
const PLACEHOLDER_CONFIDENCE: f64 = 0.85;

/// Project next-month volume per product from a 60-day sales history.
///
/// Sales are split into the current 30 days and the 30 days before; the
/// growth rate between the periods picks a trend label, and the forecast is
/// the current volume scaled by a momentum factor. Output is sorted by
/// forecasted volume, highest first.
pub fn generate_forecasts(
    products: &[Product],
    sales: &[Sale],
    now: DateTime<Utc>,
) -> Vec<ProductForecast> {
    let thirty_days_ago = now - Duration::days(CURRENT_PERIOD_DAYS);
    let sixty_days_ago = now - Duration::days(HISTORY_DAYS);

    let mut forecasts: Vec<ProductForecast> = products
        .iter()
        .map(|product| {
            let mut current_qty: u32 = 0;
            let mut previous_qty: u32 = 0;
            let mut daily_history: BTreeMap<NaiveDate, u32> = BTreeMap::new();

            for sale in sales {
                let qty = sale.quantity_of(&product.id);
                if qty == 0 {
                    continue;
                }
                if sale.date >= sixty_days_ago {
                    *daily_history.entry(sale.date.date_naive()).or_insert(0) += qty;
                }
                if sale.date >= thirty_days_ago {
                    current_qty += qty;
                } else if sale.date >= sixty_days_ago {
                    previous_qty += qty;
                }
            }

            let growth_rate = if previous_qty > 0 {
                (f64::from(current_qty) - f64::from(previous_qty)) / f64::from(previous_qty)
                    * 100.0
            } else if current_qty > 0 {
                100.0
            } else {
                0.0
            };

            let trend = if previous_qty == 0 && current_qty > 0 {
                Trend::New
            } else if growth_rate >= HIGH_GROWTH_RATE {
                Trend::HighGrowth
            } else if growth_rate <= DECLINING_RATE {
                Trend::Declining
            } else {
                Trend::Stable
            };

            let momentum_factor = match trend {
                Trend::HighGrowth => HIGH_GROWTH_MOMENTUM,
                Trend::Declining => DECLINING_MOMENTUM,
                Trend::Stable | Trend::New => 1.0,
            };
            let forecasted_sales = (f64::from(current_qty) * momentum_factor).ceil() as u32;

            ProductForecast {
                product_id: product.id.clone(),
                name: product.name.clone(),
                current_monthly_sales: current_qty,
                previous_monthly_sales: previous_qty,
                growth_rate,
                trend,
                forecasted_sales,
                confidence: PLACEHOLDER_CONFIDENCE,
                history: daily_history
                    .into_iter()
                    .map(|(date, value)| HistoryPoint { date, value })
                    .collect(),
            }
        })
        .collect();

    forecasts.sort_by(|a, b| b.forecasted_sales.cmp(&a.forecasted_sales));
    forecasts
}
