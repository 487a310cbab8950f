//! Enumerated value sets for lightsaber records
//!
//! Each set is defined exactly once here. The validator, the store adapter
//! and the client CLI all parse through these types, so the allowed values
//! cannot drift between layers.
//!
//! Wire values are case-sensitive and match exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a member of an enumerated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue {
    /// Human label of the set (e.g. "Color")
    pub set: &'static str,
    /// The rejected input
    pub value: String,
}

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.value, self.set.to_lowercase())
    }
}

impl std::error::Error for UnknownValue {}

/// Declares a closed string enumeration with its wire values.
macro_rules! value_set {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in canonical order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human label used in validation messages.
            pub const LABEL: &'static str = $label;

            /// Wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// All wire values, in canonical order.
            pub fn values() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }

            /// Looks up a member by its exact wire value.
            pub fn parse(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s).ok_or_else(|| UnknownValue {
                    set: $label,
                    value: s.to_string(),
                })
            }
        }
    };
}

value_set! {
    /// Blade color
    Color, "Color" {
        Blue => "blue",
        Green => "green",
        Red => "red",
        Purple => "purple",
        Yellow => "yellow",
        Orange => "orange",
        White => "white",
        Black => "black",
        Silver => "silver",
    }
}

value_set! {
    /// Focusing crystal
    CrystalType, "Crystal type" {
        Kyber => "Kyber",
        Synthetic => "Synthetic",
        Adegan => "Adegan",
        Ilum => "Ilum",
        Hurrikaine => "Hurrikaine",
        KraytDragonPearl => "Krayt Dragon Pearl",
        Solari => "Solari",
        MantleOfTheForce => "Mantle of the Force",
    }
}

value_set! {
    /// Hilt construction material
    HiltMaterial, "Hilt material" {
        Durasteel => "Durasteel",
        Phrik => "Phrik",
        Cortosis => "Cortosis",
        Beskar => "Beskar",
        Electrum => "Electrum",
        Chromium => "Chromium",
        Bronzium => "Bronzium",
        Aurodium => "Aurodium",
    }
}

impl Color {
    /// Capitalized form for display ("Blue").
    pub fn display_name(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
