//! Homepage sliders/banners: a public ordered list of active entries and
//! full admin CRUD.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/sliders` | No | Active sliders ordered by display_order |
//! | POST | `/api/admin/sliders` | Admin | Create slider |
//! | PUT | `/api/admin/sliders/{id}` | Admin | Update slider |
//! | DELETE | `/api/admin/sliders/{id}` | Admin | Delete slider |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SliderService;
