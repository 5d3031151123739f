//! Medicine inventory intake: record model, validation, list store and
//! alert derivation.
//!
//! This crate is deterministic domain logic only (no IO, no HTTP, no async).
//! Submission to a backend lives in `pharmademand-submission`.

pub mod alerts;
pub mod event;
pub mod record;
pub mod store;
pub mod validate;

pub use alerts::{Alert, AlertKind, AlertPolicy, DEFAULT_THRESHOLD, WARNING_HORIZON_DAYS, compute_alerts};
pub use event::{InventoryChange, InventoryEvent};
pub use record::{FieldValue, MedicineRecord, RecordDraft};
pub use store::RecordListStore;
pub use validate::{ValidationResult, check_record, check_threshold, parse_draft, parse_field, validate};
