//! Product category hierarchy: a self-referencing tree plus the
//! many-to-many association to products.
//!
//! The acyclic-tree invariant is enforced at write time (`tree::CategoryTree`
//! rejects re-parenting a category under its own descendant); reads
//! reconstitute the hierarchy from the flat table.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | Flat list or tree (`?tree=true`) |
//! | GET | `/api/categories/{slug}` | No | Category by slug |
//! | GET | `/api/categories/{slug}/breadcrumbs` | No | Ancestor chain, self first |
//! | POST | `/api/admin/categories` | Admin | Create category |
//! | PUT | `/api/admin/categories/{id}` | Admin | Update / re-parent |
//! | DELETE | `/api/admin/categories/{id}` | Admin | Delete (children re-parented) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tree;

pub use services::CategoryService;
