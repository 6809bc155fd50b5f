//! Input and output records for the analytics engine.
//!
//! Inputs (`Product`, `Sale`) are owned by the surrounding data layer; the
//! engine only reads them. Outputs are recomputed on every invocation and
//! never persisted.

pub mod alert;
pub mod forecast;
pub mod health;
pub mod insight;
pub mod product;
pub mod sale;

pub use alert::{AlertSeverity, SystemAlert};
pub use forecast::{HistoryPoint, ProductForecast, Trend};
pub use health::{StockHealth, StockHealthStatus};
pub use insight::{ActionType, InsightMetadata, InsightType, StrategicInsight};
pub use product::Product;
pub use sale::{Sale, SaleItem};
