//! Field validation.
//!
//! Pure functions over raw form text. The same rules back per-keystroke
//! feedback ([`validate`]) and bulk validation before insertion or submission
//! ([`parse_draft`], [`check_record`]).

use serde::{Deserialize, Serialize};

use pharmademand_core::{DomainError, DomainResult, Field};

use crate::record::{FieldValue, MedicineRecord, RecordDraft};

/// Presentation-facing verdict for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    /// Empty when `ok`.
    pub message: String,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    pub fn invalid(error: &DomainError) -> Self {
        Self {
            ok: false,
            message: error.to_string(),
        }
    }
}

impl<T> From<&DomainResult<T>> for ValidationResult {
    fn from(result: &DomainResult<T>) -> Self {
        match result {
            Ok(_) => Self::valid(),
            Err(err) => Self::invalid(err),
        }
    }
}

/// Validate one field's raw text.
pub fn validate(field: Field, raw: &str) -> ValidationResult {
    ValidationResult::from(&parse_field(field, raw))
}

/// Parse one field's raw text into its typed value.
///
/// - `name`: must not be blank; surrounding whitespace is trimmed.
/// - numeric fields: must parse as an integer; `demand` must be > 0,
///   `stock` and `threshold` must be >= 0.
/// - `threshold` may be blank, meaning unset.
pub fn parse_field(field: Field, raw: &str) -> DomainResult<FieldValue> {
    let trimmed = raw.trim();
    match field {
        Field::Name => {
            if trimmed.is_empty() {
                return Err(DomainError::empty_field(field));
            }
            Ok(FieldValue::Name(trimmed.to_string()))
        }
        Field::Stock => parse_count(field, trimmed).map(FieldValue::Stock),
        Field::Demand => parse_count(field, trimmed).map(FieldValue::Demand),
        Field::Threshold if trimmed.is_empty() => Ok(FieldValue::Threshold(None)),
        Field::Threshold => parse_count(field, trimmed).map(|t| FieldValue::Threshold(Some(t))),
    }
}

fn parse_count(field: Field, trimmed: &str) -> DomainResult<i64> {
    if trimmed.is_empty() {
        return Err(DomainError::empty_field(field));
    }
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| DomainError::not_numeric(field, trimmed))?;
    check_range(field, value)?;
    Ok(value)
}

fn check_range(field: Field, value: i64) -> DomainResult<()> {
    let in_range = if field.allows_zero() { value >= 0 } else { value > 0 };
    if in_range {
        Ok(())
    } else {
        Err(DomainError::not_positive(field, value))
    }
}

/// Check a shared default threshold (same range as a per-record threshold).
pub fn check_threshold(threshold: i64) -> DomainResult<()> {
    check_range(Field::Threshold, threshold)
}

/// Validate every field of a draft, in field order, and build the record.
///
/// Returns the first failure.
pub fn parse_draft(draft: &RecordDraft) -> DomainResult<MedicineRecord> {
    let mut record = MedicineRecord::new(String::new(), 0, 0);
    for field in Field::ALL {
        record.apply(parse_field(field, draft.get(field))?);
    }
    Ok(record)
}

/// Apply the same rules to an already-typed record.
pub fn check_record(record: &MedicineRecord) -> DomainResult<()> {
    if record.name.trim().is_empty() {
        return Err(DomainError::empty_field(Field::Name));
    }
    check_range(Field::Stock, record.stock)?;
    check_range(Field::Demand, record.demand)?;
    if let Some(threshold) = record.threshold {
        check_range(Field::Threshold, threshold)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn blank_names_are_rejected() {
        for raw in ["", "   ", "\t\n"] {
            assert_eq!(
                parse_field(Field::Name, raw).unwrap_err(),
                DomainError::empty_field(Field::Name)
            );
        }
        assert_eq!(
            parse_field(Field::Name, "  Aspirin ").unwrap(),
            FieldValue::Name("Aspirin".to_string())
        );
    }

    #[test]
    fn non_integers_are_not_numeric() {
        for raw in ["abc", "1.5", "12a", "--3"] {
            let err = parse_field(Field::Stock, raw).unwrap_err();
            assert!(matches!(err, DomainError::NotNumeric { field: Field::Stock, .. }), "{raw}");
        }
    }

    #[test]
    fn stock_and_threshold_allow_zero_but_demand_does_not() {
        assert_eq!(parse_field(Field::Stock, "0").unwrap(), FieldValue::Stock(0));
        assert_eq!(
            parse_field(Field::Threshold, "0").unwrap(),
            FieldValue::Threshold(Some(0))
        );
        assert_eq!(
            parse_field(Field::Demand, "0").unwrap_err(),
            DomainError::not_positive(Field::Demand, 0)
        );
    }

    #[test]
    fn negatives_are_not_positive() {
        assert_eq!(
            parse_field(Field::Stock, "-1").unwrap_err(),
            DomainError::not_positive(Field::Stock, -1)
        );
        assert_eq!(
            parse_field(Field::Threshold, "-4").unwrap_err(),
            DomainError::not_positive(Field::Threshold, -4)
        );
    }

    #[test]
    fn blank_threshold_means_unset_but_blank_stock_is_empty() {
        assert_eq!(
            parse_field(Field::Threshold, "  ").unwrap(),
            FieldValue::Threshold(None)
        );
        assert_eq!(
            parse_field(Field::Stock, "").unwrap_err(),
            DomainError::empty_field(Field::Stock)
        );
    }

    #[test]
    fn validate_reports_ok_and_message() {
        assert_eq!(validate(Field::Demand, "4"), ValidationResult::valid());

        let result = validate(Field::Demand, "zero");
        assert!(!result.ok);
        assert!(result.message.contains("demand"));
    }

    #[test]
    fn parse_draft_reports_first_failure_in_field_order() {
        let draft = RecordDraft::new("", "-1", "0");
        assert_eq!(
            parse_draft(&draft).unwrap_err(),
            DomainError::empty_field(Field::Name)
        );

        let draft = RecordDraft::new("Aspirin", "-1", "0");
        assert_eq!(
            parse_draft(&draft).unwrap_err(),
            DomainError::not_positive(Field::Stock, -1)
        );
    }

    #[test]
    fn parse_draft_builds_typed_record() {
        let draft = RecordDraft::new(" Aspirin ", "200", " 20 ").with_threshold("15");
        assert_eq!(
            parse_draft(&draft).unwrap(),
            MedicineRecord::new("Aspirin", 200, 20).with_threshold(15)
        );
    }

    #[test]
    fn check_record_matches_field_rules() {
        assert!(check_record(&MedicineRecord::new("Aspirin", 0, 1)).is_ok());
        assert_eq!(
            check_record(&MedicineRecord::new("Aspirin", -1, 5)).unwrap_err(),
            DomainError::not_positive(Field::Stock, -1)
        );
        assert_eq!(
            check_record(&MedicineRecord::new("Aspirin", 3, 5).with_threshold(-2)).unwrap_err(),
            DomainError::not_positive(Field::Threshold, -2)
        );
        assert_eq!(
            check_record(&MedicineRecord::new(" ", 3, 5)).unwrap_err(),
            DomainError::empty_field(Field::Name)
        );
    }

    proptest! {
        /// Property: `validate` and `parse_field` always agree.
        #[test]
        fn validate_agrees_with_parse_field(raw in "\\PC{0,12}", idx in 0usize..4) {
            let field = Field::ALL[idx];
            let verdict = validate(field, &raw);
            prop_assert_eq!(verdict.ok, parse_field(field, &raw).is_ok());
            prop_assert_eq!(verdict.ok, verdict.message.is_empty());
        }

        /// Property: any in-range integer is accepted for its field.
        #[test]
        fn in_range_integers_are_accepted(stock in 0i64..1_000_000, demand in 1i64..10_000) {
            prop_assert_eq!(
                parse_field(Field::Stock, &stock.to_string()).unwrap(),
                FieldValue::Stock(stock)
            );
            prop_assert_eq!(
                parse_field(Field::Demand, &demand.to_string()).unwrap(),
                FieldValue::Demand(demand)
            );
        }
    }
}
