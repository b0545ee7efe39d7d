use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::orders::models::{Order, OrderStatus};

/// One requested line of a new order
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PlaceOrderItemDto {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Request DTO for placing an order. Duplicate product lines are merged
/// before stock is checked.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PlaceOrderDto {
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<PlaceOrderItemDto>,
}

/// One line of a stored order, with the product title joined in for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    pub product_id: Uuid,
    pub product_title: String,
    pub quantity: i32,
    #[schema(value_type = String, example = "19.99")]
    pub unit_price: Decimal,
}

/// Response DTO for order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    #[schema(value_type = String, example = "59.97")]
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemDto>,
}

impl OrderResponseDto {
    pub fn from_order(order: Order, items: Vec<OrderItemDto>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            status: order.status,
            total: order.total,
            created_at: order.created_at,
            items,
        }
    }
}

/// Request DTO for an admin status change
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusDto {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn empty_order_is_rejected() {
        let dto = PlaceOrderDto { items: vec![] };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn zero_quantity_line_is_rejected() {
        let dto = PlaceOrderDto {
            items: vec![PlaceOrderItemDto {
                product_id: Uuid::new_v4(),
                quantity: 0,
            }],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn valid_order_passes_validation() {
        let dto = PlaceOrderDto {
            items: vec![PlaceOrderItemDto {
                product_id: Uuid::new_v4(),
                quantity: 3,
            }],
        };
        assert!(dto.validate().is_ok());
    }
}
