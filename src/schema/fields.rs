//! Field constraints for lightsaber payloads
//!
//! The table below is pure data. The validator walks it in order, which
//! also fixes the order in which violations are reported.

use super::types::{Color, CrystalType, HiltMaterial};

/// Minimum length (in characters) of free-text fields
pub const TEXT_MIN_CHARS: usize = 1;

/// Maximum length (in characters) of free-text fields
pub const TEXT_MAX_CHARS: usize = 100;

/// Which enumerated set a field draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSet {
    Color,
    CrystalType,
    HiltMaterial,
}

impl ValueSet {
    /// Allowed wire values, in canonical order
    pub fn values(&self) -> Vec<&'static str> {
        match self {
            ValueSet::Color => Color::values(),
            ValueSet::CrystalType => CrystalType::values(),
            ValueSet::HiltMaterial => HiltMaterial::values(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            ValueSet::Color => Color::parse(value).is_some(),
            ValueSet::CrystalType => CrystalType::parse(value).is_some(),
            ValueSet::HiltMaterial => HiltMaterial::parse(value).is_some(),
        }
    }
}

/// Type and bounds of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text with inclusive character bounds
    Text { min: usize, max: usize },
    /// String drawn from an enumerated set
    OneOf(ValueSet),
    /// JSON boolean
    Bool,
}

impl FieldKind {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } | FieldKind::OneOf(_) => "string",
            FieldKind::Bool => "boolean",
        }
    }
}

/// A single client-writable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// JSON key on the wire
    pub key: &'static str,
    /// Label used at the start of validation messages
    pub label: &'static str,
    pub kind: FieldKind,
    /// Whether a create / full replace must supply it
    pub required: bool,
}

const TEXT: FieldKind = FieldKind::Text {
    min: TEXT_MIN_CHARS,
    max: TEXT_MAX_CHARS,
};

/// Client-writable fields, in validation order.
///
/// `id` and `createdAt` are server-assigned and deliberately absent.
pub const FIELDS: &[FieldDef] = &[
    FieldDef {
        key: "name",
        label: "Name",
        kind: TEXT,
        required: true,
    },
    FieldDef {
        key: "color",
        label: "Color",
        kind: FieldKind::OneOf(ValueSet::Color),
        required: true,
    },
    FieldDef {
        key: "creator",
        label: "Creator",
        kind: TEXT,
        required: true,
    },
    FieldDef {
        key: "crystalType",
        label: "Crystal type",
        kind: FieldKind::OneOf(ValueSet::CrystalType),
        required: true,
    },
    FieldDef {
        key: "hiltMaterial",
        label: "Hilt material",
        kind: FieldKind::OneOf(ValueSet::HiltMaterial),
        required: true,
    },
    FieldDef {
        key: "isActive",
        label: "isActive",
        kind: FieldKind::Bool,
        required: false,
    },
];
