use serde::{Deserialize, Serialize};

use pharmademand_core::{DomainResult, Field};

use crate::validate;

/// A validated medicine record.
///
/// This is also the wire shape sent to the submission endpoint: a flat JSON
/// object with `name`, `stock`, `demand`, and `threshold` only when set.
///
/// Numeric fields are signed so that out-of-range values built outside the
/// validator stay representable and are rejected by [`validate::check_record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineRecord {
    pub name: String,
    pub stock: i64,
    pub demand: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i64>,
}

impl MedicineRecord {
    pub fn new(name: impl Into<String>, stock: i64, demand: i64) -> Self {
        Self {
            name: name.into(),
            stock,
            demand,
            threshold: None,
        }
    }

    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// The record's own threshold, or `default` when unset.
    pub fn effective_threshold(&self, default: i64) -> i64 {
        self.threshold.unwrap_or(default)
    }

    /// Projected days of stock left at the current daily demand.
    ///
    /// # Panics
    ///
    /// Panics if `demand` is not positive. Records only reach this point after
    /// validation, so a zero demand here is a broken invariant.
    pub fn days_until_out_of_stock(&self) -> f64 {
        assert!(
            self.demand > 0,
            "days_until_out_of_stock on unvalidated record {:?} (demand {})",
            self.name,
            self.demand
        );
        self.stock as f64 / self.demand as f64
    }

    /// Overwrite one field with an already-validated value.
    pub fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::Name(name) => self.name = name,
            FieldValue::Stock(stock) => self.stock = stock,
            FieldValue::Demand(demand) => self.demand = demand,
            FieldValue::Threshold(threshold) => self.threshold = threshold,
        }
    }

    pub fn to_draft(&self) -> RecordDraft {
        RecordDraft::from(self)
    }
}

/// A typed, validated value for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Name(String),
    Stock(i64),
    Demand(i64),
    /// `None` when the user left the threshold blank.
    Threshold(Option<i64>),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            FieldValue::Name(_) => Field::Name,
            FieldValue::Stock(_) => Field::Stock,
            FieldValue::Demand(_) => Field::Demand,
            FieldValue::Threshold(_) => Field::Threshold,
        }
    }
}

/// Raw form text for one record, exactly as the user typed it.
///
/// `RecordDraft::default()` is the blank form template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub name: String,
    pub stock: String,
    pub demand: String,
    pub threshold: String,
}

impl RecordDraft {
    /// The blank template: every field empty.
    pub fn blank() -> Self {
        Self::default()
    }

    /// A draft with the three required fields and no threshold.
    pub fn new(
        name: impl Into<String>,
        stock: impl Into<String>,
        demand: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            stock: stock.into(),
            demand: demand.into(),
            threshold: String::new(),
        }
    }

    pub fn with_threshold(mut self, threshold: impl Into<String>) -> Self {
        self.threshold = threshold.into();
        self
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Stock => &self.stock,
            Field::Demand => &self.demand,
            Field::Threshold => &self.threshold,
        }
    }

    pub fn set(&mut self, field: Field, raw: impl Into<String>) {
        let raw = raw.into();
        match field {
            Field::Name => self.name = raw,
            Field::Stock => self.stock = raw,
            Field::Demand => self.demand = raw,
            Field::Threshold => self.threshold = raw,
        }
    }

    /// Whether every field is blank (the user has not started typing).
    pub fn is_blank(&self) -> bool {
        Field::ALL
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }

    /// Validate every field and build the typed record.
    pub fn parse(&self) -> DomainResult<MedicineRecord> {
        validate::parse_draft(self)
    }
}

impl From<&MedicineRecord> for RecordDraft {
    fn from(record: &MedicineRecord) -> Self {
        Self {
            name: record.name.clone(),
            stock: record.stock.to_string(),
            demand: record.demand.to_string(),
            threshold: record
                .threshold
                .map(|t| t.to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_omitted_from_json_when_unset() {
        let record = MedicineRecord::new("Aspirin", 200, 20);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "Aspirin", "stock": 200, "demand": 20 })
        );

        let json = serde_json::to_value(record.with_threshold(15)).unwrap();
        assert_eq!(json["threshold"], 15);
    }

    #[test]
    fn effective_threshold_falls_back_to_default() {
        let record = MedicineRecord::new("Ibuprofen", 150, 10);
        assert_eq!(record.effective_threshold(10), 10);
        assert_eq!(record.with_threshold(0).effective_threshold(10), 0);
    }

    #[test]
    fn days_use_real_division() {
        let record = MedicineRecord::new("Antibiotics", 50, 15);
        let days = record.days_until_out_of_stock();
        assert!((days - 50.0 / 15.0).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "unvalidated record")]
    fn zero_demand_is_a_broken_invariant() {
        MedicineRecord::new("Broken", 10, 0).days_until_out_of_stock();
    }

    #[test]
    fn drafts_round_trip_through_records() {
        let record = MedicineRecord::new("Paracetamol", 0, 3).with_threshold(5);
        let draft = record.to_draft();
        assert_eq!(draft.threshold, "5");
        assert_eq!(draft.parse().unwrap(), record);

        let unset = MedicineRecord::new("Paracetamol", 0, 3).to_draft();
        assert_eq!(unset.threshold, "");
    }

    #[test]
    fn blank_template_is_blank() {
        let draft = RecordDraft::blank();
        assert!(draft.is_blank());
        assert_eq!(draft.get(Field::Name), "");

        let mut draft = draft;
        draft.set(Field::Stock, "12");
        assert!(!draft.is_blank());
        assert_eq!(draft.get(Field::Stock), "12");
    }
}
