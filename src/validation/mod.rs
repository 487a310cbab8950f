//! Request validation
//!
//! Pure functions from client input to either a typed, checked value or a
//! `ValidationError` listing every violated constraint. Runs before any
//! store call.

mod errors;
mod validator;

pub use errors::{ValidationError, ValidationResult, Violation};
pub use validator::{validate_create, validate_id, validate_query_filters, validate_update};
