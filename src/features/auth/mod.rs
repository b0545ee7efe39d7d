//! Authentication feature: registration, login and bearer-token issuance.
//!
//! Tokens are self-issued HS256 JWTs signed with a shared secret; the
//! middleware in `core::middleware` validates them on protected routes.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/register` | No | Register a new customer account |
//! | POST | `/api/auth/login` | No | Login with email and password |
//! | GET | `/api/auth/me` | Yes | Current authenticated user |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod password;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};
