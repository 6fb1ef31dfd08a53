use async_trait::async_trait;
use thiserror::Error;

use shopwise_core::domain::cart::Cart;
use shopwise_core::domain::order::{Order, OrderId};
use shopwise_core::domain::session::{SessionId, SessionProfile};

pub mod cart;
pub mod memory;
pub mod order;
pub mod session;

pub use cart::SqlCartRepository;
pub use memory::{InMemoryCartRepository, InMemoryOrderRepository, InMemorySessionRepository};
pub use order::SqlOrderRepository;
pub use session::SqlSessionRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find(&self, id: &SessionId) -> Result<Option<SessionProfile>, RepositoryError>;
    /// Upserts the profile keyed by its own session id.
    async fn save(&self, profile: SessionProfile) -> Result<(), RepositoryError>;
    /// Returns whether a profile existed.
    async fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Missing carts read as empty.
    async fn find(&self, session_id: &SessionId) -> Result<Cart, RepositoryError>;
    async fn save(&self, session_id: &SessionId, cart: Cart) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Newest first.
    async fn list_for_session(&self, session_id: &SessionId)
        -> Result<Vec<Order>, RepositoryError>;
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError>;
    async fn save(&self, order: Order) -> Result<(), RepositoryError>;
    async fn delete(&self, id: &OrderId) -> Result<bool, RepositoryError>;
}
