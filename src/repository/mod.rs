//! Lightsaber repository
//!
//! Translates validated requests into document store operations and stored
//! documents back into `Lightsaber` records. The store handle is injected at
//! construction; there is no global client.

mod errors;
mod lightsabers;

pub use errors::{RepositoryError, RepositoryResult};
pub use lightsabers::{LightsaberRepository, COLLECTION};
