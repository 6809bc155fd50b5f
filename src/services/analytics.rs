use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::config::AnalyticsSettings;
use crate::errors::AnalyticsError;
use crate::models::{Product, ProductForecast, Sale, StrategicInsight, SystemAlert};
use crate::services::{alerts, forecasting, insights, metrics, transfers};
use crate::validation::validate_snapshot;

/// Facade over the analytics engine.
///
/// Holds the tuned settings and is the only layer that reads the system
/// clock; every computation below it takes an explicit `now`. The facade also
/// runs the snapshot integrity pass so malformed input surfaces as a
/// `DataIntegrity` error instead of silently wrong output.
#[derive(Clone, Debug, Default)]
pub struct AnalyticsService {
    settings: AnalyticsSettings,
}

impl AnalyticsService {
    pub fn new(settings: AnalyticsSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Strategic insights for the current snapshot, evaluated now.
    pub fn insights(
        &self,
        products: &[Product],
        sales: &[Sale],
        locations: &[String],
    ) -> Result<Vec<StrategicInsight>, AnalyticsError> {
        self.insights_at(products, sales, locations, Utc::now())
    }

    #[instrument(skip(self, products, sales))]
    pub fn insights_at(
        &self,
        products: &[Product],
        sales: &[Sale],
        locations: &[String],
        now: DateTime<Utc>,
    ) -> Result<Vec<StrategicInsight>, AnalyticsError> {
        validate_snapshot(products, sales)?;
        let insights = insights::generate_insights(products, sales, locations, &self.settings, now);
        info!(count = insights.len(), "generated strategic insights");
        Ok(insights)
    }

    /// Cross-location transfer recommendations only.
    pub fn transfer_opportunities(
        &self,
        products: &[Product],
        sales: &[Sale],
        locations: &[String],
    ) -> Result<Vec<StrategicInsight>, AnalyticsError> {
        self.transfer_opportunities_at(products, sales, locations, Utc::now())
    }

    #[instrument(skip(self, products, sales))]
    pub fn transfer_opportunities_at(
        &self,
        products: &[Product],
        sales: &[Sale],
        locations: &[String],
        now: DateTime<Utc>,
    ) -> Result<Vec<StrategicInsight>, AnalyticsError> {
        validate_snapshot(products, sales)?;
        let opportunities =
            transfers::find_transfer_opportunities(products, sales, locations, &self.settings, now);
        info!(count = opportunities.len(), "found transfer opportunities");
        Ok(opportunities)
    }

    /// 30-day-ahead demand forecasts, highest projected volume first.
    pub fn forecasts(
        &self,
        products: &[Product],
        sales: &[Sale],
    ) -> Result<Vec<ProductForecast>, AnalyticsError> {
        self.forecasts_at(products, sales, Utc::now())
    }

    #[instrument(skip(self, products, sales))]
    pub fn forecasts_at(
        &self,
        products: &[Product],
        sales: &[Sale],
        now: DateTime<Utc>,
    ) -> Result<Vec<ProductForecast>, AnalyticsError> {
        validate_snapshot(products, sales)?;
        let forecasts = forecasting::generate_forecasts(products, sales, now);
        info!(count = forecasts.len(), "generated product forecasts");
        Ok(forecasts)
    }

    /// Prioritized stockout/expiry/low-stock alerts.
    pub fn alerts(&self, products: &[Product]) -> Result<Vec<SystemAlert>, AnalyticsError> {
        self.alerts_at(products, Utc::now())
    }

    #[instrument(skip(self, products))]
    pub fn alerts_at(
        &self,
        products: &[Product],
        now: DateTime<Utc>,
    ) -> Result<Vec<SystemAlert>, AnalyticsError> {
        validate_snapshot(products, &[])?;
        Ok(alerts::generate_alerts(products, &self.settings, now))
    }

    /// Dashboard headline metrics over a trailing window.
    pub fn dashboard_metrics(
        &self,
        products: &[Product],
        sales: &[Sale],
        window_days: u32,
    ) -> Result<metrics::DashboardMetrics, AnalyticsError> {
        self.dashboard_metrics_at(products, sales, window_days, Utc::now())
    }

    #[instrument(skip(self, products, sales))]
    pub fn dashboard_metrics_at(
        &self,
        products: &[Product],
        sales: &[Sale],
        window_days: u32,
        now: DateTime<Utc>,
    ) -> Result<metrics::DashboardMetrics, AnalyticsError> {
        if window_days == 0 {
            return Err(AnalyticsError::InvalidInput(
                "window_days must be at least 1".to_string(),
            ));
        }
        validate_snapshot(products, sales)?;
        Ok(metrics::dashboard_metrics(products, sales, window_days, now))
    }
}
