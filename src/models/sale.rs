use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a recorded sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    /// Product id this line refers to (serialized as `id` for parity with the
    /// upstream sales documents).
    #[serde(rename = "id")]
    pub product_id: String,
    pub price: Decimal,
    pub quantity: u32,
    /// Unit cost captured at sale time; falls back to the catalog cost when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
}

/// A recorded sale transaction. Sales are immutable once recorded; the engine
/// only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub date: DateTime<Utc>,
    pub location_id: String,
    pub items: Vec<SaleItem>,
    pub total_amount: Decimal,
    pub total_tax: Decimal,
}

impl Sale {
    /// Quantity of the given product sold in this transaction.
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }

    /// Whether this sale contains the given product.
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }
}
