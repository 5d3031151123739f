use serde::{Deserialize, Serialize};

use crate::record::MedicineRecord;

/// Shared critical-stock cutoff used when a record has no threshold of its own.
pub const DEFAULT_THRESHOLD: i64 = 10;

/// Stock projected to last this many days or fewer raises a warning.
pub const WARNING_HORIZON_DAYS: u32 = 3;

/// Stock-risk alert for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Position of the record in the list the alert was derived from.
    pub index: usize,
    pub name: String,
    pub kind: AlertKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "lowercase")]
pub enum AlertKind {
    /// Stock is at or below the effective threshold.
    Critical { stock: i64, threshold: i64 },
    /// Stock runs out within the warning horizon (rounded up to whole days).
    Warning { days_remaining: u64 },
}

impl Alert {
    pub fn is_critical(&self) -> bool {
        matches!(self.kind, AlertKind::Critical { .. })
    }

    /// User-facing alert text.
    pub fn message(&self) -> String {
        match self.kind {
            AlertKind::Critical { stock, threshold } => format!(
                "Critical: {} stock is {stock}, at or below the threshold of {threshold}",
                self.name
            ),
            AlertKind::Warning { days_remaining: 1 } => {
                format!("Warning: {} will run out within 1 day", self.name)
            }
            AlertKind::Warning { days_remaining } => format!(
                "Warning: {} will run out within {days_remaining} days",
                self.name
            ),
        }
    }
}

impl core::fmt::Display for Alert {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Alert derivation parameters.
///
/// Model, per record and in input order:
/// - Critical if `stock <= threshold` (record's own, else `default_threshold`).
/// - Otherwise Warning if `stock / demand <= warning_horizon_days`, carrying
///   the ceiling of the projected days.
/// - Otherwise nothing.
///
/// Critical always wins over Warning. Evaluation is pure: the output depends
/// only on the records and the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPolicy {
    pub default_threshold: i64,
    pub warning_horizon_days: u32,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            warning_horizon_days: WARNING_HORIZON_DAYS,
        }
    }
}

impl AlertPolicy {
    pub fn new(default_threshold: i64) -> Self {
        Self {
            default_threshold,
            ..Self::default()
        }
    }

    pub fn with_warning_horizon(mut self, days: u32) -> Self {
        self.warning_horizon_days = days;
        self
    }

    pub fn evaluate(&self, records: &[MedicineRecord]) -> Vec<Alert> {
        records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| self.evaluate_one(index, record))
            .collect()
    }

    /// # Panics
    ///
    /// Panics if a non-critical record has `demand <= 0`; validated records
    /// never do.
    pub fn evaluate_one(&self, index: usize, record: &MedicineRecord) -> Option<Alert> {
        let threshold = record.effective_threshold(self.default_threshold);
        if record.stock <= threshold {
            return Some(Alert {
                index,
                name: record.name.clone(),
                kind: AlertKind::Critical {
                    stock: record.stock,
                    threshold,
                },
            });
        }

        let days = record.days_until_out_of_stock();
        if days > f64::from(self.warning_horizon_days) {
            return None;
        }

        Some(Alert {
            index,
            name: record.name.clone(),
            kind: AlertKind::Warning {
                days_remaining: days.ceil() as u64,
            },
        })
    }
}

/// Derive alerts with the standard three-day warning horizon.
pub fn compute_alerts(records: &[MedicineRecord], default_threshold: i64) -> Vec<Alert> {
    AlertPolicy::new(default_threshold).evaluate(records)
}
