use serde::{Deserialize, Serialize};
use strum::Display;

/// Stock-health band for a product or a single location's holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum StockHealthStatus {
    Overstock,
    #[serde(rename = "Stockout Risk")]
    #[strum(serialize = "Stockout Risk")]
    StockoutRisk,
    Healthy,
    #[serde(rename = "Dead Stock")]
    #[strum(serialize = "Dead Stock")]
    DeadStock,
}

/// Stock health assessment bundling the classification with the metrics it
/// was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockHealth {
    pub status: StockHealthStatus,
    pub cover_days: f64,
    pub aging_score: f64,
}
