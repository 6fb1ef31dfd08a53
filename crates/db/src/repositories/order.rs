use sqlx::Row;

use shopwise_core::domain::order::{Order, OrderId, OrderItem, OrderStatus, ShippingAddress};
use shopwise_core::domain::session::SessionId;

use super::{OrderRepository, RepositoryError};
use crate::DbPool;

pub struct SqlOrderRepository {
    pool: DbPool,
}

impl SqlOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_order(row: &sqlx::sqlite::SqliteRow) -> Result<Order, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let session_id: String =
        row.try_get("session_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let items_json: String =
        row.try_get("items_json").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let total: f64 = row.try_get("total").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let shipping_json: String =
        row.try_get("shipping_json").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let status_str: String =
        row.try_get("status").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let created_at: i64 =
        row.try_get("created_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let items: Vec<OrderItem> = serde_json::from_str(&items_json)?;
    let shipping_address: ShippingAddress = serde_json::from_str(&shipping_json)?;
    let status = OrderStatus::parse(&status_str)
        .ok_or_else(|| RepositoryError::Decode(format!("unknown order status `{status_str}`")))?;

    Ok(Order {
        id: OrderId(id),
        session_id: SessionId(session_id),
        items,
        total,
        shipping_address,
        status,
        created_at,
    })
}

#[async_trait::async_trait]
impl OrderRepository for SqlOrderRepository {
    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT id, session_id, items_json, total, shipping_json, status, created_at
             FROM customer_order
             WHERE session_id = ?
             ORDER BY created_at DESC, rowid DESC",
        )
        .bind(session_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_order).collect::<Result<Vec<_>, _>>()
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, session_id, items_json, total, shipping_json, status, created_at
             FROM customer_order WHERE id = ?",
        )
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_order(r)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, order: Order) -> Result<(), RepositoryError> {
        let items_json = serde_json::to_string(&order.items)?;
        let shipping_json = serde_json::to_string(&order.shipping_address)?;

        sqlx::query(
            "INSERT INTO customer_order (id, session_id, items_json, total, shipping_json,
                                         status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 items_json = excluded.items_json,
                 total = excluded.total,
                 shipping_json = excluded.shipping_json,
                 status = excluded.status",
        )
        .bind(&order.id.0)
        .bind(order.session_id.as_str())
        .bind(items_json)
        .bind(order.total)
        .bind(shipping_json)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM customer_order WHERE id = ?")
            .bind(&id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
