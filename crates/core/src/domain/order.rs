use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::cart::Cart;
use crate::domain::product::ProductId;
use crate::domain::session::SessionId;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Confirmed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "confirmed" => Some(Self::Confirmed),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("fullName", &self.full_name),
            ("street", &self.street),
            ("city", &self.city),
            ("postalCode", &self.postal_code),
            ("country", &self.country),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(DomainError::InvariantViolation(format!(
                    "shipping address field `{name}` must not be blank"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price_at_purchase: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub session_id: SessionId,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub shipping_address: ShippingAddress,
    pub status: OrderStatus,
    pub created_at: i64,
}

/// Builds a confirmed order priced at current catalog prices. Lines whose
/// product is no longer in the catalog are dropped; clearing the cart is the
/// caller's job.
pub fn place_order(
    session_id: &SessionId,
    cart: &Cart,
    catalog: &Catalog,
    shipping_address: ShippingAddress,
    now_ms: i64,
) -> Result<Order, DomainError> {
    if cart.is_empty() {
        return Err(DomainError::EmptyCart);
    }
    shipping_address.validate()?;

    let items: Vec<OrderItem> = cart
        .items
        .iter()
        .filter_map(|item| {
            catalog.product(&item.product_id).map(|product| OrderItem {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                price_at_purchase: product.price,
            })
        })
        .collect();

    if items.is_empty() {
        return Err(DomainError::EmptyCart);
    }

    let total = items.iter().map(|item| item.price_at_purchase * f64::from(item.quantity)).sum();

    Ok(Order {
        id: OrderId::generate(),
        session_id: session_id.clone(),
        items,
        total,
        shipping_address,
        status: OrderStatus::Confirmed,
        created_at: now_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::{place_order, OrderStatus, ShippingAddress};
    use crate::catalog::Catalog;
    use crate::domain::cart::Cart;
    use crate::domain::product::ProductId;
    use crate::domain::session::SessionId;
    use crate::errors::DomainError;

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Ada Lovelace".to_owned(),
            street: "12 Analytical Row".to_owned(),
            city: "London".to_owned(),
            postal_code: "N1 9GU".to_owned(),
            country: "UK".to_owned(),
        }
    }

    #[test]
    fn empty_cart_cannot_be_ordered() {
        let result = place_order(
            &SessionId("s-1".to_owned()),
            &Cart::default(),
            &Catalog::seeded(),
            address(),
            0,
        );

        assert_eq!(result, Err(DomainError::EmptyCart));
    }

    #[test]
    fn blank_address_field_is_rejected() {
        let mut cart = Cart::default();
        cart.add_item(&ProductId::new("book-001"), 1);
        let mut shipping = address();
        shipping.city = "   ".to_owned();

        let result =
            place_order(&SessionId("s-1".to_owned()), &cart, &Catalog::seeded(), shipping, 5);

        assert!(matches!(result, Err(DomainError::InvariantViolation(message)) if message.contains("city")));
    }

    #[test]
    fn order_snapshots_prices_and_drops_unknown_lines() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::default();
        let book = ProductId::new("book-001");
        cart.add_item(&book, 1);
        cart.add_item(&book, 2);
        cart.add_item(&ProductId::new("ghost-404"), 3);

        let order = place_order(&SessionId("s-1".to_owned()), &cart, &catalog, address(), 99)
            .expect("order placed");

        let unit = catalog.product(&book).expect("seeded").price;
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert!((order.total - unit * 2.0).abs() < f64::EPSILON);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.created_at, 99);
    }
}
