use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::product::ProductId;
use crate::domain::session::BehaviorEvent;
use crate::errors::DomainError;

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub added_at: i64,
}

/// One cart line per product. Every mutation that changes membership returns
/// the behavioral event the session learner should see.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub last_modified: i64,
}

impl Cart {
    pub fn add_item(&mut self, product_id: &ProductId, now_ms: i64) -> BehaviorEvent {
        match self.items.iter_mut().find(|item| &item.product_id == product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(1).min(MAX_LINE_QUANTITY)
            }
            None => self.items.push(CartItem {
                product_id: product_id.clone(),
                quantity: 1,
                added_at: now_ms,
            }),
        }
        self.last_modified = now_ms;
        BehaviorEvent::add_to_cart(product_id.as_str(), now_ms)
    }

    pub fn remove_item(&mut self, product_id: &ProductId, now_ms: i64) -> BehaviorEvent {
        self.items.retain(|item| &item.product_id != product_id);
        self.last_modified = now_ms;
        BehaviorEvent::remove_from_cart(product_id.as_str(), now_ms)
    }

    /// Non-positive quantities remove the line; anything above
    /// [`MAX_LINE_QUANTITY`] is rejected and leaves the cart untouched.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        now_ms: i64,
    ) -> Result<Option<BehaviorEvent>, DomainError> {
        if quantity <= 0 {
            return Ok(Some(self.remove_item(product_id, now_ms)));
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity <= MAX_LINE_QUANTITY)
            .ok_or_else(|| DomainError::InvalidQuantity {
                product_id: product_id.to_string(),
                quantity,
            })?;
        if let Some(existing) = self.items.iter_mut().find(|item| &item.product_id == product_id) {
            existing.quantity = quantity;
            self.last_modified = now_ms;
        }
        Ok(None)
    }

    pub fn clear(&mut self, now_ms: i64) {
        self.items.clear();
        self.last_modified = now_ms;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn product_ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|item| item.product_id.clone()).collect()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }

    pub fn total(&self, catalog: &Catalog) -> f64 {
        self.items
            .iter()
            .map(|item| {
                catalog
                    .product(&item.product_id)
                    .map(|product| product.price * f64::from(item.quantity))
                    .unwrap_or(0.0)
            })
            .sum()
    }
}
