use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::AnalyticsSettings;
use crate::models::{AlertSeverity, Product, SystemAlert};
use crate::services::stock_status::{is_expired, is_expiring_soon, is_low_stock, is_stockout};

const CRITICAL_PRIORITY: u8 = 3;
const WARNING_PRIORITY: u8 = 2;

/// Build the prioritized alert feed for UI notification badges.
///
/// Each product contributes at most one stock alert and one expiry alert;
/// the combined list is sorted by priority (critical first) and truncated to
/// the configured cap.
pub fn generate_alerts(
    products: &[Product],
    settings: &AnalyticsSettings,
    now: DateTime<Utc>,
) -> Vec<SystemAlert> {
    let mut alerts = Vec::new();

    for product in products {
        if is_stockout(product) {
            alerts.push(SystemAlert {
                id: format!("alert-stockout-{}", product.id),
                severity: AlertSeverity::Critical,
                title: "Stockout Alert".to_string(),
                message: format!(
                    "{} is completely out of stock! Restock immediately.",
                    product.name
                ),
                date: now,
                priority: CRITICAL_PRIORITY,
            });
        } else if is_low_stock(product, settings.default_min_stock) {
            let total_stock = product.total_stock();
            let min_stock = product.min_stock_level.unwrap_or(settings.default_min_stock);
            alerts.push(SystemAlert {
                id: format!("alert-lowstock-{}", product.id),
                severity: AlertSeverity::Warning,
                title: "Low Stock Warning".to_string(),
                message: format!(
                    "{} is below threshold ({total_stock} < {min_stock}).",
                    product.name
                ),
                date: now,
                priority: WARNING_PRIORITY,
            });
        }

        if is_expired(product, now) {
            let expiry = product
                .expiry_date
                .map(|d| d.to_string())
                .unwrap_or_default();
            alerts.push(SystemAlert {
                id: format!("alert-expired-{}", product.id),
                severity: AlertSeverity::Critical,
                title: "Product Expired".to_string(),
                message: format!("{} expired on {expiry}. Remove from shelves.", product.name),
                date: now,
                priority: CRITICAL_PRIORITY,
            });
        } else if is_expiring_soon(product, settings.expiry_warning_days, now) {
            let days_to_expiry = product
                .expiry_date
                .map(|d| (d - now.date_naive()).num_days())
                .unwrap_or_default();
            alerts.push(SystemAlert {
                id: format!("alert-expiry-soon-{}", product.id),
                severity: AlertSeverity::Warning,
                title: "Expiring Soon".to_string(),
                message: format!(
                    "{} expires in {days_to_expiry} days. Promote to clear stock.",
                    product.name
                ),
                date: now,
                priority: WARNING_PRIORITY,
            });
        }
    }

    debug!(raw = alerts.len(), "alerts before priority cap");
    alerts.sort_by(|a, b| b.priority.cmp(&a.priority));
    alerts.truncate(settings.max_alerts);
    alerts
}
