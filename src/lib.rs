//! Inventory Analytics Engine
//!
//! A pure, stateless computation layer for multi-location retail inventory:
//! it ingests the current in-memory snapshot of products and sales and
//! derives stock-health classifications, dead-stock detection, cross-location
//! transfer recommendations, pricing/reorder/growth insights, short-horizon
//! demand forecasts, and prioritized system alerts.
//!
//! Every operation is a pure function of `(products, sales, now)`: no I/O, no
//! locks, no state between calls. Outputs are recomputed on each invocation;
//! nothing is cached or persisted. The engine is safe to call concurrently
//! from multiple logical callers.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod errors;
pub mod models;
pub mod notifications;
pub mod services;
pub mod validation;

pub use config::{AnalyticsSettings, TransferSettings};
pub use errors::AnalyticsError;
pub use models::{
    ActionType, AlertSeverity, HistoryPoint, InsightMetadata, InsightType, Product,
    ProductForecast, Sale, SaleItem, StockHealth, StockHealthStatus, StrategicInsight,
    SystemAlert, Trend,
};
pub use notifications::{Notification, NotificationLog, NotificationSeverity};
pub use services::AnalyticsService;
