use crate::utils::error::{CouponError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque catalog item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A resolved catalog item. The price is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub price: Decimal,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, price: Decimal) -> Result<Self> {
        let id = id.into();
        if price < Decimal::ZERO {
            return Err(CouponError::ValidationError {
                message: format!("item '{}' has negative price {}", id, price),
            });
        }
        Ok(Self { id, price })
    }
}

/// Outcome of spending a budget over a set of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub selected_ids: Vec<ItemId>,
    pub total_spent: Decimal,
}

impl SelectionResult {
    pub fn empty() -> Self {
        Self {
            selected_ids: Vec::new(),
            total_spent: Decimal::ZERO,
        }
    }
}

/// Number of favorite marks recorded for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCount {
    pub id: ItemId,
    pub quantity: u64,
}

/// A single (user, item) favorite association.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct FavoriteMark {
    pub user_id: String,
    pub item_id: ItemId,
}

impl FavoriteMark {
    pub fn new(user_id: impl Into<String>, item_id: impl Into<ItemId>) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRequest {
    pub item_ids: Vec<ItemId>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub item_ids: Vec<ItemId>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
}

impl From<SelectionResult> for CouponResponse {
    fn from(result: SelectionResult) -> Self {
        Self {
            item_ids: result.selected_ids,
            total: result.total_spent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_item_rejects_negative_price() {
        assert!(Item::new("a", dec!(0)).is_ok());
        assert!(Item::new("a", dec!(-0.01)).is_err());
    }

    #[test]
    fn test_coupon_request_wire_format() {
        let request: CouponRequest = serde_json::from_value(serde_json::json!({
            "itemIds": ["MLA1", "MLA2"],
            "amount": 500.5
        }))
        .unwrap();

        assert_eq!(request.item_ids, vec![ItemId::from("MLA1"), ItemId::from("MLA2")]);
        assert_eq!(request.amount, dec!(500.5));
    }

    #[test]
    fn test_coupon_response_serializes_total_as_number() {
        let response = CouponResponse::from(SelectionResult {
            selected_ids: vec![ItemId::from("b")],
            total_spent: dec!(123.42),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"itemIds": ["b"], "total": 123.42}));
    }
}
