use sqlx::Row;

use shopwise_core::domain::cart::{Cart, CartItem};
use shopwise_core::domain::session::SessionId;

use super::{CartRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCartRepository {
    pool: DbPool,
}

impl SqlCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CartRepository for SqlCartRepository {
    async fn find(&self, session_id: &SessionId) -> Result<Cart, RepositoryError> {
        let row = sqlx::query("SELECT items_json, last_modified FROM cart WHERE session_id = ?")
            .bind(session_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(Cart::default());
        };

        let items_json: String =
            row.try_get("items_json").map_err(|e| RepositoryError::Decode(e.to_string()))?;
        let last_modified: i64 =
            row.try_get("last_modified").map_err(|e| RepositoryError::Decode(e.to_string()))?;
        let items: Vec<CartItem> = serde_json::from_str(&items_json)?;

        Ok(Cart { items, last_modified })
    }

    async fn save(&self, session_id: &SessionId, cart: Cart) -> Result<(), RepositoryError> {
        let items_json = serde_json::to_string(&cart.items)?;

        sqlx::query(
            "INSERT INTO cart (session_id, items_json, last_modified)
             VALUES (?, ?, ?)
             ON CONFLICT(session_id) DO UPDATE SET
                 items_json = excluded.items_json,
                 last_modified = excluded.last_modified",
        )
        .bind(session_id.as_str())
        .bind(items_json)
        .bind(cart.last_modified)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
