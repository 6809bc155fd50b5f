use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Severity band for a system alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

/// Prioritized notification surfaced to UI badges. At most one stock alert
/// and one expiry alert exist per product, so no cross-product dedup is
/// needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub date: DateTime<Utc>,
    /// Higher is more important: critical = 3, warning = 2.
    pub priority: u8,
}
