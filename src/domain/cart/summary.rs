use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CartItem;
use crate::domain::foundation::OwnerId;

/// Read-only projection of a cart for checkout previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub owner_id: OwnerId,
    pub items: Vec<CartItem>,
    pub total_price: Decimal,
    pub total_items: u64,
}
