//! User accounts: own profile management plus admin account administration.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/users/profile` | Yes | Own profile |
//! | PUT | `/api/users/profile` | Yes | Update display name |
//! | PUT | `/api/users/password` | Yes | Change password (re-verifies current) |
//! | GET | `/api/admin/users` | Admin | Paginated user list |
//! | PUT | `/api/admin/users/{id}/active` | Admin | Activate/deactivate account |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
