//! # REST API
//!
//! JSON handlers for lightsaber records, mounted under `/api`.
//!
//! | Method | Path                 | Success            |
//! |--------|----------------------|--------------------|
//! | GET    | /lightsabers         | 200 list           |
//! | GET    | /lightsabers/:id     | 200 record         |
//! | POST   | /lightsabers         | 201 created record |
//! | PUT    | /lightsabers/:id     | 200 record         |
//! | PATCH  | /lightsabers/:id     | 200 record         |
//! | DELETE | /lightsabers/:id     | 204 empty          |

pub mod docs;
pub mod errors;
pub mod handler;
pub mod response;

pub use errors::{ApiError, ApiResult, UNEXPECTED_ERROR};
pub use handler::{docs_page, health, lightsaber_routes, route_not_found, AppState};
pub use response::ApiResponse;
