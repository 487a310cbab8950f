//! Record and payload types
//!
//! Wire format is camelCase JSON. `createdAt` is RFC 3339 in UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Color, CrystalType, HiltMaterial};

/// A stored lightsaber record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lightsaber {
    /// Server-assigned UUID, immutable
    pub id: String,
    pub name: String,
    pub color: Color,
    pub creator: String,
    pub crystal_type: CrystalType,
    pub hilt_material: HiltMaterial,
    /// Set once at creation, immutable
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Payload for create (POST) and full replace (PUT)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLightsaber {
    pub name: String,
    pub color: Color,
    pub creator: String,
    pub crystal_type: CrystalType,
    pub hilt_material: HiltMaterial,
    /// Defaults to true when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl NewLightsaber {
    /// Effective activation state once defaults are applied
    pub fn is_active_or_default(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

/// Payload for partial update (PATCH). Absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightsaberPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crystal_type: Option<CrystalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hilt_material: Option<HiltMaterial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl LightsaberPatch {
    /// True when the patch touches no field
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.color.is_none()
            && self.creator.is_none()
            && self.crystal_type.is_none()
            && self.hilt_material.is_none()
            && self.is_active.is_none()
    }

    /// Applies the supplied fields to a record in place
    pub fn apply_to(&self, record: &mut Lightsaber) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(color) = self.color {
            record.color = color;
        }
        if let Some(creator) = &self.creator {
            record.creator = creator.clone();
        }
        if let Some(crystal_type) = self.crystal_type {
            record.crystal_type = crystal_type;
        }
        if let Some(hilt_material) = self.hilt_material {
            record.hilt_material = hilt_material;
        }
        if let Some(is_active) = self.is_active {
            record.is_active = is_active;
        }
    }
}

/// Exact-match predicates for listing. All supplied predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    pub color: Option<Color>,
    pub creator: Option<String>,
    pub is_active: Option<bool>,
}

impl ListFilters {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.creator.is_none() && self.is_active.is_none()
    }

    /// Query-string pairs in the form the list endpoint accepts
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(color) = self.color {
            pairs.push(("color", color.as_str().to_string()));
        }
        if let Some(creator) = &self.creator {
            pairs.push(("creator", creator.clone()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("active", active.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Lightsaber {
        Lightsaber {
            id: "3f1c2a8e-5b7d-4c9a-8e2f-1a2b3c4d5e6f".to_string(),
            name: "Mace Windu's Lightsaber".to_string(),
            color: Color::Purple,
            creator: "Mace Windu".to_string(),
            crystal_type: CrystalType::Kyber,
            hilt_material: HiltMaterial::Electrum,
            created_at: Utc.with_ymd_and_hms(2023, 3, 5, 16, 45, 0).unwrap(),
            is_active: true,
        }
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["crystalType"], "Kyber");
        assert_eq!(value["hiltMaterial"], "Electrum");
        assert_eq!(value["isActive"], true);
        assert_eq!(value["createdAt"], "2023-03-05T16:45:00Z");
    }

    #[test]
    fn test_new_lightsaber_defaults_active() {
        let new: NewLightsaber = serde_json::from_value(json!({
            "name": "Test",
            "color": "blue",
            "creator": "X",
            "crystalType": "Kyber",
            "hiltMaterial": "Durasteel"
        }))
        .unwrap();
        assert_eq!(new.is_active, None);
        assert!(new.is_active_or_default());
    }

    #[test]
    fn test_patch_serializes_only_supplied_fields() {
        let patch = LightsaberPatch {
            color: Some(Color::Green),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"color": "green"}));
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let original = sample();
        let mut record = original.clone();
        let patch = LightsaberPatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut record);
        assert_eq!(record, original);
    }

    #[test]
    fn test_patch_applies_only_supplied_fields() {
        let original = sample();
        let mut record = original.clone();
        LightsaberPatch {
            color: Some(Color::Red),
            is_active: Some(false),
            ..Default::default()
        }
        .apply_to(&mut record);

        assert_eq!(record.color, Color::Red);
        assert!(!record.is_active);
        assert_eq!(record.name, original.name);
        assert_eq!(record.created_at, original.created_at);
    }
}
