use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pharmademand_core::Field;
use pharmademand_events::Event;

use crate::alerts::Alert;
use crate::record::MedicineRecord;

/// What changed in the record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InventoryChange {
    RecordAdded {
        index: usize,
        record: MedicineRecord,
    },
    /// A field's text was edited. `committed` is false when the text did not
    /// validate and only the draft changed.
    RecordUpdated {
        index: usize,
        field: Field,
        committed: bool,
    },
    RecordRemoved {
        index: usize,
        record: MedicineRecord,
    },
    ListCleared {
        removed: usize,
    },
    DefaultThresholdChanged {
        threshold: i64,
    },
}

/// Published by the store after every successful mutation, carrying the
/// alert list recomputed for the new contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEvent {
    pub change: InventoryChange,
    pub len: usize,
    pub alerts: Vec<Alert>,
    pub occurred_at: DateTime<Utc>,
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self.change {
            InventoryChange::RecordAdded { .. } => "inventory.record.added",
            InventoryChange::RecordUpdated { .. } => "inventory.record.updated",
            InventoryChange::RecordRemoved { .. } => "inventory.record.removed",
            InventoryChange::ListCleared { .. } => "inventory.list.cleared",
            InventoryChange::DefaultThresholdChanged { .. } => {
                "inventory.default_threshold.changed"
            }
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
