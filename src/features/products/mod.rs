//! Product catalog: public browsing plus admin catalog management and the
//! product-to-category assignment (many-to-many, unique per pair).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/products` | No | Paginated list (`?category=`, `?search=`) |
//! | GET | `/api/products/{slug}` | No | Product detail with categories |
//! | POST | `/api/admin/products` | Admin | Create product |
//! | PUT | `/api/admin/products/{id}` | Admin | Update product |
//! | DELETE | `/api/admin/products/{id}` | Admin | Retire product (soft delete) |
//! | PUT | `/api/admin/products/{id}/categories` | Admin | Replace category assignments |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProductService;
