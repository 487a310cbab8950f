//! # HTTP Server Module
//!
//! Axum server hosting the lightsaber API.
//!
//! # Endpoints
//!
//! - `/` - Documentation page
//! - `/health` - Health check
//! - `/api/lightsabers` - Lightsaber CRUD

pub mod config;
pub mod server;

pub use config::{HttpServerConfig, DEFAULT_BODY_LIMIT_BYTES, DEFAULT_HOST, DEFAULT_PORT};
pub use server::{shutdown_signal, HttpServer};
