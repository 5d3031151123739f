//! Field vocabulary of a medicine record.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// A user-editable field of a medicine record.
///
/// The declaration order is the order in which fields are validated, so the
/// "first failure" of a record is always reported for the earliest field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Stock,
    Demand,
    Threshold,
}

impl Field {
    /// All fields, in validation order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Stock, Field::Demand, Field::Threshold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Stock => "stock",
            Field::Demand => "demand",
            Field::Threshold => "threshold",
        }
    }

    /// Whether the field holds an integer.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Field::Name)
    }

    /// Whether zero is an acceptable value (only `demand` must be strictly positive).
    pub fn allows_zero(&self) -> bool {
        !matches!(self, Field::Demand)
    }

    /// Whether blank input is acceptable (it means "unset").
    pub fn is_optional(&self) -> bool {
        matches!(self, Field::Threshold)
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field {0:?} (expected name, stock, demand or threshold)")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "stock" => Ok(Field::Stock),
            "demand" => Ok(Field::Demand),
            "threshold" => Ok(Field::Threshold),
            other => Err(UnknownField(other.to_string())),
        }
    }
}
