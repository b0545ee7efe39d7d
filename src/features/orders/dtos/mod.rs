mod order_dto;

pub use order_dto::{
    OrderItemDto, OrderResponseDto, PlaceOrderDto, PlaceOrderItemDto, UpdateOrderStatusDto,
};
