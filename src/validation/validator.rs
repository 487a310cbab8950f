//! Payload, identifier and query validation
//!
//! Every check walks the whole input and collects all violations before
//! failing. Nothing here touches the store.
//!
//! Null handling: an explicit `null` is rejected for every field on both
//! create and update. Omitting a key is the only way to leave a field
//! unchanged in a patch.

use std::collections::HashMap;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::schema::{
    Color, CrystalType, FieldDef, FieldKind, HiltMaterial, LightsaberPatch, ListFilters,
    NewLightsaber, ValueSet, FIELDS, TEXT_MAX_CHARS, TEXT_MIN_CHARS,
};

use super::errors::{ValidationError, ValidationResult, Violation};

/// Length of a hyphenated UUID string
const UUID_HYPHENATED_LEN: usize = 36;

/// Whether required fields must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

/// A field value that passed its constraint
#[derive(Debug, Clone, Copy)]
enum Checked<'a> {
    Str(&'a str),
    Bool(bool),
}

/// Fields that passed validation, keyed by JSON key
#[derive(Debug, Default)]
struct CheckedFields<'a> {
    values: HashMap<&'static str, Checked<'a>>,
}

impl<'a> CheckedFields<'a> {
    fn text(&self, key: &'static str) -> Option<String> {
        match self.values.get(key) {
            Some(Checked::Str(s)) => Some((*s).to_string()),
            _ => None,
        }
    }

    fn member<T: std::str::FromStr>(&self, key: &'static str) -> Option<T> {
        match self.values.get(key) {
            Some(Checked::Str(s)) => s.parse().ok(),
            _ => None,
        }
    }

    fn boolean(&self, key: &'static str) -> Option<bool> {
        match self.values.get(key) {
            Some(Checked::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

/// Validates a create (POST) or full replace (PUT) payload.
///
/// # Errors
///
/// Returns `ValidationError` listing every missing required field, wrong
/// type, out-of-bounds length and value outside an enumerated set.
pub fn validate_create(payload: &Value) -> ValidationResult<NewLightsaber> {
    let fields = check_payload(payload, Mode::Create)?;

    Ok(NewLightsaber {
        name: require(fields.text("name"), "name", "Name")?,
        color: require(fields.member::<Color>("color"), "color", "Color")?,
        creator: require(fields.text("creator"), "creator", "Creator")?,
        crystal_type: require(
            fields.member::<CrystalType>("crystalType"),
            "crystalType",
            "Crystal type",
        )?,
        hilt_material: require(
            fields.member::<HiltMaterial>("hiltMaterial"),
            "hiltMaterial",
            "Hilt material",
        )?,
        is_active: fields.boolean("isActive"),
    })
}

/// Validates a partial update (PATCH) payload.
///
/// Same rules as [`validate_create`] but every field is optional. An empty
/// object is a valid no-op patch.
pub fn validate_update(payload: &Value) -> ValidationResult<LightsaberPatch> {
    let fields = check_payload(payload, Mode::Update)?;

    Ok(LightsaberPatch {
        name: fields.text("name"),
        color: fields.member("color"),
        creator: fields.text("creator"),
        crystal_type: fields.member("crystalType"),
        hilt_material: fields.member("hiltMaterial"),
        is_active: fields.boolean("isActive"),
    })
}

/// Validates a record identifier taken from the request path.
///
/// Identifiers are hyphenated UUID strings; any other shape is rejected so
/// that the format stays consistent across the store.
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::single(Violation::new(
            "id",
            "Lightsaber ID is required",
        )));
    }

    if id.len() != UUID_HYPHENATED_LEN || Uuid::parse_str(id).is_err() {
        return Err(ValidationError::invalid_id());
    }

    Ok(())
}

/// Validates list query parameters. Unknown parameters are ignored.
pub fn validate_query_filters(query: &HashMap<String, String>) -> ValidationResult<ListFilters> {
    let mut violations = Vec::new();
    let mut filters = ListFilters::default();

    if let Some(color) = query.get("color") {
        match Color::parse(color) {
            Some(c) => filters.color = Some(c),
            None => violations.push(Violation::not_in_set(
                "color",
                Color::LABEL,
                &Color::values(),
            )),
        }
    }

    if let Some(creator) = query.get("creator") {
        if within_bounds(creator, TEXT_MIN_CHARS, TEXT_MAX_CHARS) {
            filters.creator = Some(creator.clone());
        } else {
            violations.push(Violation::length(
                "creator",
                "Creator",
                TEXT_MIN_CHARS,
                TEXT_MAX_CHARS,
            ));
        }
    }

    if let Some(active) = query.get("active") {
        match active.as_str() {
            "true" => filters.is_active = Some(true),
            "false" => filters.is_active = Some(false),
            _ => violations.push(Violation::new(
                "active",
                "Active must be \"true\" or \"false\"",
            )),
        }
    }

    ValidationError::check(violations)?;
    Ok(filters)
}

/// Runs every field constraint and collects all violations.
fn check_payload(payload: &Value, mode: Mode) -> ValidationResult<CheckedFields<'_>> {
    let obj = as_object(payload)?;

    let mut violations = Vec::new();
    let mut fields = CheckedFields::default();

    for def in FIELDS {
        match check_field(def, obj.get(def.key), mode) {
            Ok(Some(checked)) => {
                fields.values.insert(def.key, checked);
            }
            Ok(None) => {}
            Err(violation) => violations.push(violation),
        }
    }

    ValidationError::check(violations)?;
    Ok(fields)
}

fn as_object(payload: &Value) -> ValidationResult<&Map<String, Value>> {
    payload.as_object().ok_or_else(|| {
        ValidationError::single(Violation::new(
            "$root",
            "Request body must be a JSON object",
        ))
    })
}

/// Checks one field against its definition.
///
/// `Ok(None)` means the field was legitimately absent.
fn check_field<'a>(
    def: &FieldDef,
    value: Option<&'a Value>,
    mode: Mode,
) -> Result<Option<Checked<'a>>, Violation> {
    let must_be_present = mode == Mode::Create && def.required;

    let value = match value {
        None if must_be_present => return Err(Violation::required(def.key, def.label)),
        None => return Ok(None),
        Some(Value::Null) => return Err(Violation::null_value(def.key, def.label)),
        Some(v) => v,
    };

    match def.kind {
        FieldKind::Text { min, max } => {
            let s = expect_str(def, value)?;
            if s.is_empty() && must_be_present {
                return Err(Violation::required(def.key, def.label));
            }
            if !within_bounds(s, min, max) {
                return Err(Violation::length(def.key, def.label, min, max));
            }
            Ok(Some(Checked::Str(s)))
        }
        FieldKind::OneOf(set) => {
            let s = expect_str(def, value)?;
            if s.is_empty() && must_be_present {
                return Err(Violation::required(def.key, def.label));
            }
            check_member(def, set, s)?;
            Ok(Some(Checked::Str(s)))
        }
        FieldKind::Bool => value
            .as_bool()
            .map(|b| Some(Checked::Bool(b)))
            .ok_or_else(|| Violation::type_mismatch(def.key, def.label, def.kind.type_name())),
    }
}

fn expect_str<'a>(def: &FieldDef, value: &'a Value) -> Result<&'a str, Violation> {
    value
        .as_str()
        .ok_or_else(|| Violation::type_mismatch(def.key, def.label, def.kind.type_name()))
}

fn check_member(def: &FieldDef, set: ValueSet, value: &str) -> Result<(), Violation> {
    if set.contains(value) {
        Ok(())
    } else {
        Err(Violation::not_in_set(def.key, def.label, &set.values()))
    }
}

/// Character-count bounds check (not bytes)
fn within_bounds(s: &str, min: usize, max: usize) -> bool {
    let len = s.chars().count();
    len >= min && len <= max
}

/// Converts a value the field pass already accepted into its typed form.
fn require<T>(value: Option<T>, field: &'static str, label: &str) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::single(Violation::required(field, label)))
}
