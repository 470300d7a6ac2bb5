//! Order repository.
//!
//! Queries are runtime-checked (`query_as` + `bind`) and select columns under
//! the field names of [`Order`], so rows decode straight into core types.

use sqlx::PgPool;
use tracing::{debug, instrument};

use smoothies_core::{ChangeSet, Order, OrderDraft, OrderId};

use super::RepositoryError;

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a validated order.
    ///
    /// Identifier, timestamp, and the `filled` flag take the column defaults.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, draft), fields(name = %draft.name()))]
    pub async fn create(&self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            INSERT INTO smoothies.orders (name_on_order, ingredients)
            VALUES ($1, $2)
            RETURNING order_uid AS id,
                      order_filled AS filled,
                      name_on_order AS name,
                      ingredients,
                      order_ts AS created_at
            ",
        )
        .bind(draft.name())
        .bind(draft.ingredients().joined())
        .fetch_one(self.pool)
        .await?;

        debug!(order_id = %order.id, "Inserted order");
        Ok(order)
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such order exists.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Order, RepositoryError> {
        sqlx::query_as::<_, Order>(
            r"
            SELECT order_uid AS id,
                   order_filled AS filled,
                   name_on_order AS name,
                   ingredients,
                   order_ts AS created_at
            FROM smoothies.orders
            WHERE order_uid = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// List unfulfilled orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_pending(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT order_uid AS id,
                   order_filled AS filled,
                   name_on_order AS name,
                   ingredients,
                   order_ts AS created_at
            FROM smoothies.orders
            WHERE order_filled = FALSE
            ORDER BY order_ts DESC, order_uid DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        debug!(count = orders.len(), "Fetched pending orders");
        Ok(orders)
    }

    /// Write changed `filled` flags back, matching rows by order id.
    ///
    /// All changes go out as one statement, so either every matched row is
    /// updated or none is. Ids that no longer exist are skipped; the returned
    /// count is the number of rows actually updated. An empty change set
    /// returns `Ok(0)` without touching the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, changes), fields(changes = changes.len()))]
    pub async fn apply_fulfillment(&self, changes: &ChangeSet) -> Result<u64, RepositoryError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let ids: Vec<i32> = changes.ids().into_iter().map(i32::from).collect();
        let filled = changes.filled_flags();

        let result = sqlx::query(
            r"
            UPDATE smoothies.orders AS o
            SET order_filled = c.filled
            FROM UNNEST($1::int4[], $2::bool[]) AS c(order_uid, filled)
            WHERE o.order_uid = c.order_uid
            ",
        )
        .bind(&ids)
        .bind(&filled)
        .execute(self.pool)
        .await?;

        debug!(updated = result.rows_affected(), "Merged fulfillment changes");
        Ok(result.rows_affected())
    }
}
