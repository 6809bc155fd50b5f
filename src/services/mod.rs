//! The analytics engine proper: pure computations over a product/sales
//! snapshot, plus the `AnalyticsService` facade that ties them to settings,
//! validation and the system clock.

pub mod alerts;
pub mod analytics;
pub mod forecasting;
pub mod insights;
pub mod metrics;
pub mod stock_status;
pub mod transfers;
pub mod velocity;

pub use analytics::AnalyticsService;
