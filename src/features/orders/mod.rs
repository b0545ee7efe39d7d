//! Orders: placement with transactional stock reservation, customer order
//! history, cancellation of pending orders, and admin status management.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/orders` | JWT | Place an order |
//! | GET | `/api/orders` | JWT | Own orders, paginated |
//! | GET | `/api/orders/{id}` | JWT | Own order with items |
//! | POST | `/api/orders/{id}/cancel` | JWT | Cancel own pending order |
//! | GET | `/api/admin/orders` | Admin | All orders, paginated |
//! | PUT | `/api/admin/orders/{id}/status` | Admin | Move order along allowed transitions |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::OrderService;
