//! Domain error model.

use thiserror::Error;

use crate::field::Field;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures a user can fix (bad input,
/// a stale list index). Transport concerns belong to the submission crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field was blank or whitespace-only.
    #[error("{field} cannot be empty")]
    EmptyField { field: Field },

    /// A numeric field did not parse as a whole number.
    #[error("{field} must be a whole number (got {value:?})")]
    NotNumeric { field: Field, value: String },

    /// A numeric field was outside its allowed range.
    ///
    /// `demand` must be strictly positive; `stock` and `threshold` must not be
    /// negative.
    #[error("{field} {}, got {value}", positivity_rule(.field))]
    NotPositive { field: Field, value: i64 },

    /// A list index did not address an existing entry.
    #[error("no entry at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

fn positivity_rule(field: &Field) -> &'static str {
    if field.allows_zero() {
        "cannot be negative"
    } else {
        "must be greater than zero"
    }
}

impl DomainError {
    pub fn empty_field(field: Field) -> Self {
        Self::EmptyField { field }
    }

    pub fn not_numeric(field: Field, value: impl Into<String>) -> Self {
        Self::NotNumeric {
            field,
            value: value.into(),
        }
    }

    pub fn not_positive(field: Field, value: i64) -> Self {
        Self::NotPositive { field, value }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// The field this error is about, if it is a validation failure.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::EmptyField { field }
            | Self::NotNumeric { field, .. }
            | Self::NotPositive { field, .. } => Some(*field),
            Self::IndexOutOfRange { .. } => None,
        }
    }

    /// Whether this is one of the field validation kinds.
    pub fn is_validation(&self) -> bool {
        self.field().is_some()
    }
}
