//! Resource schema for lightsaber records
//!
//! Pure data shared by the validator, the store adapter and the client:
//! - the record type and its create / patch payload types
//! - the enumerated value sets
//! - the per-field constraint table

mod fields;
mod model;
mod types;

pub use fields::{FieldDef, FieldKind, ValueSet, FIELDS, TEXT_MAX_CHARS, TEXT_MIN_CHARS};
pub use model::{Lightsaber, LightsaberPatch, ListFilters, NewLightsaber};
pub use types::{Color, CrystalType, HiltMaterial, UnknownValue};
