//! Snapshot integrity checks.
//!
//! The engine assumes the caller guarantees the data-model invariants
//! (non-negative money, stable ids). Where that guarantee cannot be assumed,
//! this pass surfaces a `DataIntegrity` error up front instead of letting
//! silently wrong output through. Quantity invariants need no runtime check:
//! stock and sale quantities are unsigned.

use rust_decimal::Decimal;

use crate::errors::AnalyticsError;
use crate::models::{Product, Sale};

/// Validate a product/sales snapshot before analysis.
pub fn validate_snapshot(products: &[Product], sales: &[Sale]) -> Result<(), AnalyticsError> {
    for product in products {
        if product.id.is_empty() {
            return Err(AnalyticsError::DataIntegrity(format!(
                "product '{}' has an empty id",
                product.name
            )));
        }
        if product.price < Decimal::ZERO {
            return Err(AnalyticsError::DataIntegrity(format!(
                "product {} has negative price {}",
                product.id, product.price
            )));
        }
        if product.cost < Decimal::ZERO {
            return Err(AnalyticsError::DataIntegrity(format!(
                "product {} has negative cost {}",
                product.id, product.cost
            )));
        }
    }

    for sale in sales {
        if sale.id.is_empty() {
            return Err(AnalyticsError::DataIntegrity(
                "sale with an empty id".to_string(),
            ));
        }
        if sale.total_amount < Decimal::ZERO || sale.total_tax < Decimal::ZERO {
            return Err(AnalyticsError::DataIntegrity(format!(
                "sale {} has negative totals",
                sale.id
            )));
        }
        for item in &sale.items {
            if item.product_id.is_empty() {
                return Err(AnalyticsError::DataIntegrity(format!(
                    "sale {} has an item with an empty product id",
                    sale.id
                )));
            }
            if item.price < Decimal::ZERO {
                return Err(AnalyticsError::DataIntegrity(format!(
                    "sale {} item {} has negative price",
                    sale.id, item.product_id
                )));
            }
            if item.cost.is_some_and(|cost| cost < Decimal::ZERO) {
                return Err(AnalyticsError::DataIntegrity(format!(
                    "sale {} item {} has negative cost",
                    sale.id, item.product_id
                )));
            }
        }
    }

    Ok(())
}
