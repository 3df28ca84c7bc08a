use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of lesion classes the engine distinguishes.
pub const CLASS_COUNT: usize = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseClassError {
    #[error("Unknown lesion class: {0}")]
    UnknownClass(String),

    #[error("Class index out of range: {0}")]
    IndexOutOfRange(usize),

    #[error("Unknown risk tier: {0}")]
    UnknownRiskTier(String),
}

/// Generates a fieldless enum with a fixed discriminant order, `as_str`,
/// `ALL`, and a `FromStr` accepting either the label or any alias.
macro_rules! indexed_enum {
    ($name:ident, $err:ident { $($variant:ident = $idx:literal => $s:literal $(| $alias:literal)*),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant = $idx),+
        }

        impl $name {
            pub const ALL: [$name; [$($idx),+].len()] = [$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            pub fn index(self) -> usize {
                self as usize
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseClassError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($s) $(|| trimmed.eq_ignore_ascii_case($alias))* {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ParseClassError::$err(s.into()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// Aliases are the HAM10000 dataset short codes.
indexed_enum!(ClassId, UnknownClass {
    ActinicKeratosis = 0 => "Actinic keratoses" | "akiec",
    BasalCellCarcinoma = 1 => "Basal cell carcinoma" | "bcc",
    BenignKeratosis = 2 => "Benign keratosis-like lesions" | "bkl",
    Dermatofibroma = 3 => "Dermatofibroma" | "df",
    MelanocyticNevus = 4 => "Melanocytic nevi" | "nv",
    Melanoma = 5 => "Melanoma" | "mel",
    VascularLesion = 6 => "Vascular lesions" | "vasc",
});

impl ClassId {
    /// Resolve a class from its position in a distribution.
    pub fn from_index(index: usize) -> Result<Self, ParseClassError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ParseClassError::IndexOutOfRange(index))
    }
}

indexed_enum!(RiskTier, UnknownRiskTier {
    Low = 0 => "Low",
    Moderate = 1 => "Moderate",
    High = 2 => "High",
    Critical = 3 => "Critical",
});
