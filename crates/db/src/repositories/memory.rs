use std::collections::HashMap;

use tokio::sync::RwLock;

use shopwise_core::domain::cart::Cart;
use shopwise_core::domain::order::{Order, OrderId};
use shopwise_core::domain::session::{SessionId, SessionProfile};

use super::{CartRepository, OrderRepository, RepositoryError, SessionRepository};

#[derive(Default)]
pub struct InMemorySessionRepository {
    profiles: RwLock<HashMap<String, SessionProfile>>,
}

#[async_trait::async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find(&self, id: &SessionId) -> Result<Option<SessionProfile>, RepositoryError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(id.as_str()).cloned())
    }

    async fn save(&self, profile: SessionProfile) -> Result<(), RepositoryError> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.session_id.0.clone(), profile);
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.remove(id.as_str()).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryCartRepository {
    carts: RwLock<HashMap<String, Cart>>,
}

#[async_trait::async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find(&self, session_id: &SessionId) -> Result<Cart, RepositoryError> {
        let carts = self.carts.read().await;
        Ok(carts.get(session_id.as_str()).cloned().unwrap_or_default())
    }

    async fn save(&self, session_id: &SessionId, cart: Cart) -> Result<(), RepositoryError> {
        let mut carts = self.carts.write().await;
        carts.insert(session_id.0.clone(), cart);
        Ok(())
    }
}

/// Keeps insertion order so listing can break `created_at` ties newest first.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

#[async_trait::async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        let mut listed: Vec<Order> =
            orders.iter().rev().filter(|order| &order.session_id == session_id).cloned().collect();
        listed.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(listed)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|order| &order.id == id).cloned())
    }

    async fn save(&self, order: Order) -> Result<(), RepositoryError> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|existing| existing.id == order.id) {
            Some(existing) => *existing = order,
            None => orders.push(order),
        }
        Ok(())
    }

    async fn delete(&self, id: &OrderId) -> Result<bool, RepositoryError> {
        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|order| &order.id != id);
        Ok(orders.len() != before)
    }
}
