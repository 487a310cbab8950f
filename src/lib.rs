//! lightsaber-api - REST record service for lightsaber records
//!
//! Request flow: router → validation → repository → document store, and
//! back out through the response envelope.

pub mod cli;
pub mod client;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod repository;
pub mod rest_api;
pub mod schema;
pub mod storage;
pub mod validation;
