//! Lightsaber API client
//!
//! Typed HTTP access to every endpoint plus plain-text rendering used by the
//! CLI subcommands.

mod api;
mod errors;
pub mod render;

pub use api::{LightsaberClient, DEFAULT_BASE_URL};
pub use errors::{ClientError, ClientResult};
