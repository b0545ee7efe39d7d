use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::orders::dtos::{OrderItemDto, OrderResponseDto, PlaceOrderDto};
use crate::features::orders::models::{Order, OrderStatus};
use crate::shared::types::PaginationQuery;

const ORDER_COLUMNS: &str = "id, user_id, status, total, created_at, updated_at";

#[derive(Debug, FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    product_id: Uuid,
    product_title: String,
    quantity: i32,
    unit_price: Decimal,
}

#[derive(Debug, FromRow)]
struct LockedProduct {
    id: Uuid,
    title: String,
    price: Decimal,
    stock: i32,
    is_active: bool,
}

/// Service for order placement and lifecycle.
///
/// Placement and cancellation run inside a single transaction with the
/// affected product rows locked, so stock never goes negative and two
/// concurrent orders cannot both claim the last unit.
pub struct OrderService {
    pool: PgPool,
}

impl OrderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Place an order for the authenticated user.
    ///
    /// Duplicate product lines are merged first. Product rows are locked in
    /// a stable order, each one checked for existence, activity, and stock,
    /// the current price captured, and stock decremented, all in one
    /// transaction.
    pub async fn place(&self, user_id: Uuid, dto: PlaceOrderDto) -> Result<OrderResponseDto> {
        // BTreeMap merges duplicates and fixes the lock acquisition order
        let mut requested: BTreeMap<Uuid, i32> = BTreeMap::new();
        for item in &dto.items {
            let entry = requested.entry(item.product_id).or_insert(0);
            *entry = entry.checked_add(item.quantity).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Total quantity for product {} is too large",
                    item.product_id
                ))
            })?;
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let mut total = Decimal::ZERO;
        let mut lines: Vec<OrderItemDto> = Vec::with_capacity(requested.len());

        for (&product_id, &quantity) in &requested {
            let product = sqlx::query_as::<_, LockedProduct>(
                "SELECT id, title, price, stock, is_active FROM products WHERE id = $1 FOR UPDATE",
            )
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| {
                AppError::BadRequest(format!("Product {} does not exist", product_id))
            })?;

            if !product.is_active {
                return Err(AppError::Conflict(format!(
                    "Product '{}' is no longer available",
                    product.title
                )));
            }
            if product.stock < quantity {
                return Err(AppError::Conflict(format!(
                    "Insufficient stock for product '{}': requested {}, available {}",
                    product.title, quantity, product.stock
                )));
            }

            sqlx::query("UPDATE products SET stock = stock - $2, updated_at = NOW() WHERE id = $1")
                .bind(product.id)
                .bind(quantity)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            total += product.price * Decimal::from(quantity);
            lines.push(OrderItemDto {
                product_id: product.id,
                product_title: product.title,
                quantity,
                unit_price: product.price,
            });
        }

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (user_id, total)
            VALUES ($1, $2)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(total)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        for line in &lines {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Order placed: id={}, user_id={}, lines={}, total={}",
            order.id,
            user_id,
            lines.len(),
            total
        );
        Ok(OrderResponseDto::from_order(order, lines))
    }

    /// List the user's own orders, newest first
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<OrderResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list orders: {:?}", e);
            AppError::Database(e)
        })?;

        self.with_items(orders).await.map(|dtos| (dtos, total))
    }

    /// Get one of the user's own orders. Another user's order is
    /// indistinguishable from a missing one.
    pub async fn get_for_user(&self, user_id: Uuid, order_id: Uuid) -> Result<OrderResponseDto> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2"
        ))
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))?;

        let items = self.items_of(order.id).await?;
        Ok(OrderResponseDto::from_order(order, items))
    }

    /// Cancel the user's own pending order and restock its items
    pub async fn cancel(&self, user_id: Uuid, order_id: Uuid) -> Result<OrderResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2 FOR UPDATE"
        ))
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))?;

        if order.status != OrderStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Only pending orders can be cancelled, this one is {}",
                order.status
            )));
        }

        let order = Self::transition(&mut tx, order, OrderStatus::Cancelled).await?;
        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Order cancelled: id={}, user_id={}", order.id, user_id);
        let items = self.items_of(order.id).await?;
        Ok(OrderResponseDto::from_order(order, items))
    }

    /// List all orders, newest first (admin)
    pub async fn list_all(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<OrderResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list orders: {:?}", e);
            AppError::Database(e)
        })?;

        self.with_items(orders).await.map(|dtos| (dtos, total))
    }

    /// Move an order along the allowed status transitions (admin).
    /// Cancelling a pending order this way restocks its items.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        next: OrderStatus,
    ) -> Result<OrderResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))?;

        if !order.status.can_transition_to(next) {
            return Err(AppError::BadRequest(format!(
                "Cannot move order from {} to {}",
                order.status, next
            )));
        }

        let order = Self::transition(&mut tx, order, next).await?;
        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Order status updated: id={}, status={}", order.id, next);
        let items = self.items_of(order.id).await?;
        Ok(OrderResponseDto::from_order(order, items))
    }

    /// Apply a status change inside the caller's transaction, restocking
    /// items when the order becomes cancelled.
    async fn transition(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order: Order,
        next: OrderStatus,
    ) -> Result<Order> {
        if next == OrderStatus::Cancelled {
            sqlx::query(
                r#"
                UPDATE products p
                SET stock = p.stock + oi.quantity, updated_at = NOW()
                FROM order_items oi
                WHERE oi.order_id = $1 AND oi.product_id = p.id
                "#,
            )
            .bind(order.id)
            .execute(&mut **tx)
            .await
            .map_err(AppError::Database)?;
        }

        sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order.id)
        .bind(next)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::Database)
    }

    async fn items_of(&self, order_id: Uuid) -> Result<Vec<OrderItemDto>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT oi.order_id, oi.product_id, p.title AS product_title,
                   oi.quantity, oi.unit_price
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows.into_iter().map(Self::row_to_item).collect())
    }

    /// Attach items to a page of orders with one join query
    async fn with_items(&self, orders: Vec<Order>) -> Result<Vec<OrderResponseDto>> {
        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();

        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT oi.order_id, oi.product_id, p.title AS product_title,
                   oi.quantity, oi.unit_price
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.created_at
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut grouped: HashMap<Uuid, Vec<OrderItemDto>> = HashMap::new();
        for row in rows {
            let order_id = row.order_id;
            grouped.entry(order_id).or_default().push(Self::row_to_item(row));
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = grouped.remove(&order.id).unwrap_or_default();
                OrderResponseDto::from_order(order, items)
            })
            .collect())
    }

    fn row_to_item(row: OrderItemRow) -> OrderItemDto {
        OrderItemDto {
            product_id: row.product_id,
            product_title: row.product_title,
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}
