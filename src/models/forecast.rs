use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Trend label assigned from the 30-day-over-30-day growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Trend {
    #[serde(rename = "High Growth")]
    #[strum(serialize = "High Growth")]
    HighGrowth,
    Stable,
    Declining,
    New,
}

/// One day of summed sales volume, for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub value: u32,
}

/// Short-horizon demand projection for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductForecast {
    pub product_id: String,
    pub name: String,
    /// Units sold in the last 30 days.
    pub current_monthly_sales: u32,
    /// Units sold in the 30 days before that.
    pub previous_monthly_sales: u32,
    /// Percentage change between the two periods.
    pub growth_rate: f64,
    pub trend: Trend,
    /// Projected units for the next 30 days.
    pub forecasted_sales: u32,
    /// Fixed placeholder until a real confidence interval replaces it; kept
    /// for behavioral parity.
    pub confidence: f64,
    /// Up to 60 days of daily volume, ordered by date.
    pub history: Vec<HistoryPoint>,
}
