use serde::{Deserialize, Serialize};
use strum::Display;

/// Category of a strategic insight, ordered by how actionable it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum InsightType {
    #[serde(rename = "Profit Optimization")]
    #[strum(serialize = "Profit Optimization")]
    ProfitOptimization,
    #[serde(rename = "Risk Mitigation")]
    #[strum(serialize = "Risk Mitigation")]
    RiskMitigation,
    #[serde(rename = "Cash Flow")]
    #[strum(serialize = "Cash Flow")]
    CashFlow,
    Growth,
}

impl InsightType {
    /// Fixed priority order used for per-product dedup and final sorting:
    /// Risk Mitigation > Profit Optimization > Cash Flow > Growth.
    pub fn priority(self) -> u8 {
        match self {
            InsightType::RiskMitigation => 3,
            InsightType::ProfitOptimization => 2,
            InsightType::CashFlow => 1,
            InsightType::Growth => 0,
        }
    }
}

/// Concrete action a caller can execute for an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Transfer,
    Liquidate,
    Reorder,
    PriceAdjust,
}

/// Action-specific parameters carried alongside an insight so the caller's
/// execute-recommendation workflow can act without re-deriving them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightMetadata {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_qty: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<u32>,
}

impl InsightMetadata {
    pub fn for_product(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            from: None,
            to: None,
            qty: None,
            reorder_qty: None,
            current_stock: None,
        }
    }
}

/// A prioritized, actionable recommendation derived from the current
/// product/sales snapshot. Ids are deterministic (kind + product + location)
/// so repeated generations dedup cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicInsight {
    pub id: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub problem: String,
    pub impact: String,
    pub recommended_action: String,
    pub roi_impact: String,
    pub confidence_score: f64,
    pub action_type: ActionType,
    pub metadata: InsightMetadata,
}
